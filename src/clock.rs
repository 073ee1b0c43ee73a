//! Setting a real-time clock from the receiver.
//!
//! The fix record keeps time and date as text. [`FixRecord::utc_datetime`]
//! turns them into a [`NaiveDateTime`], and [`ClockSeed`] hands that out once,
//! after the first time and date sentence, which is when a clock should be
//! set after power-up.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    fix::FixRecord,
    sentence::{SentenceId, SentenceKind},
};

impl FixRecord {
    /// The last received UTC date and time, if both are complete and valid.
    /// Fractional seconds are dropped.
    ///
    /// ```
    /// # use nmea_stream::Parser;
    /// # use chrono::{Datelike, Timelike};
    /// let mut parser = Parser::new();
    /// parser.feed(b"$GPZDA,201530.00,04,07,2002,00,00*60").for_each(drop);
    ///
    /// let utc = parser.fix().utc_datetime().unwrap();
    /// assert_eq!((utc.year(), utc.month(), utc.day()), (2002, 7, 4));
    /// assert_eq!((utc.hour(), utc.minute(), utc.second()), (20, 15, 30));
    /// ```
    #[must_use]
    pub fn utc_datetime(&self) -> Option<NaiveDateTime> {
        let date = self.datestamp();
        let time = self.timestamp();

        let date = NaiveDate::from_ymd_opt(
            date.year.parse().ok()?,
            date.month.parse().ok()?,
            date.day.parse().ok()?,
        )?;
        let time = NaiveTime::from_hms_opt(
            time.hours.parse().ok()?,
            time.minutes.parse().ok()?,
            time.seconds.get(..2)?.parse().ok()?,
        )?;

        Some(date.and_time(time))
    }
}

/// One-shot latch for setting a clock from the first ZDA sentence.
///
/// ```
/// # use nmea_stream::{clock::ClockSeed, Parser};
/// let mut parser = Parser::new();
/// let mut seed = ClockSeed::new();
///
/// let mut seeded = 0;
/// for _ in 0..2 {
///     for byte in b"$GNZDA,195027.000,07,09,2025,,*4B\r\n" {
///         let Some(id) = parser.update(*byte) else { continue };
///         if seed.offer(id, parser.fix()).is_some() {
///             seeded += 1;
///         }
///     }
/// }
/// assert_eq!(seeded, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClockSeed {
    seeded: bool,
}

impl ClockSeed {
    #[must_use]
    pub const fn new() -> Self {
        Self { seeded: false }
    }

    #[inline]
    #[must_use]
    pub const fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Call with every sentence the parser reports. Returns the time to set
    /// the clock to exactly once: for the first time and date sentence that
    /// carries a valid date.
    pub fn offer(&mut self, id: SentenceId, fix: &FixRecord) -> Option<NaiveDateTime> {
        if self.seeded || id.kind() != SentenceKind::Zda {
            return None;
        }

        let utc = fix.utc_datetime()?;
        self.seeded = true;
        log_info!("clock seeded from {}", id);
        Some(utc)
    }
}
