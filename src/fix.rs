//! The accumulated position and time state.
//!
//! Coordinates are kept as the ASCII text the receiver sent, split into
//! degrees, minutes and hemisphere. Converting them to a float loses
//! precision on targets without a usable `f64`, so that is left to the
//! consumer.

use core::fmt::{self, Write};

use heapless::String;

use crate::sentence::{PositionUpdate, TimeUpdate, Update};

/// Capacity of every string component in the fix record.
pub const FIELD_CAPACITY: usize = 16;

/// Capacity of a rendered coordinate, see [`Coordinate`].
pub const COORDINATE_CAPACITY: usize = 2 * FIELD_CAPACITY + 1;

/// One field of a sentence, copied out of the receive buffer.
pub type Field = String<FIELD_CAPACITY>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse a hemisphere field. Only the exact single letters are accepted.
    #[must_use]
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "N" => Some(Self::North),
            "S" => Some(Self::South),
            "E" => Some(Self::East),
            "W" => Some(Self::West),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }
}

/// A latitude or longitude as sent by the receiver.
///
/// Displays as the three parts run together, e.g. `4807.038N`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinate {
    pub degrees: Field,
    pub minutes: Field,
    pub hemisphere: Hemisphere,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.degrees, self.minutes, self.hemisphere.as_char())
    }
}

impl Coordinate {
    #[must_use]
    pub fn to_ascii(&self) -> String<COORDINATE_CAPACITY> {
        let mut out = String::new();
        // cannot overflow, both parts are at most FIELD_CAPACITY long
        let _ = write!(out, "{self}");
        out
    }
}

/// UTC time of day, `hh`, `mm` and `ss[.sss]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    pub hours: Field,
    pub minutes: Field,
    pub seconds: Field,
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

/// UTC calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Datestamp {
    pub day: Field,
    pub month: Field,
    pub year: Field,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Statistics {
    /// Sentences that passed the checksum and were decoded.
    pub parsed_sentences: u32,
    /// Sentences whose checksum did not match.
    pub crc_fails: u32,
    /// Never incremented by the parser, always 0.
    pub clean_sentences: u32,
}

/// Everything learned from the sentences decoded so far.
///
/// Only the parser writes to it, and only with a fully decoded [`Update`],
/// so a failed decode never leaves it half updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixRecord {
    latitude: Option<Coordinate>,
    longitude: Option<Coordinate>,
    timestamp: Timestamp,
    datestamp: Datestamp,
    altitude: Field,
    geoid_height: Field,
    satellites_in_use: u16,
    hdop: Field,
    fix_status: u16,
    stats: Statistics,
}

impl FixRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the first GGA sentence with a fix.
    #[inline]
    #[must_use]
    pub fn latitude(&self) -> Option<&Coordinate> {
        self.latitude.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn longitude(&self) -> Option<&Coordinate> {
        self.longitude.as_ref()
    }

    /// Latitude as one ASCII string, empty before the first fix.
    #[must_use]
    pub fn latitude_ascii(&self) -> String<COORDINATE_CAPACITY> {
        self.latitude.as_ref().map(Coordinate::to_ascii).unwrap_or_default()
    }

    /// Longitude as one ASCII string, empty before the first fix.
    #[must_use]
    pub fn longitude_ascii(&self) -> String<COORDINATE_CAPACITY> {
        self.longitude.as_ref().map(Coordinate::to_ascii).unwrap_or_default()
    }

    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    #[inline]
    #[must_use]
    pub fn datestamp(&self) -> &Datestamp {
        &self.datestamp
    }

    /// Antenna altitude above mean sea level, as sent.
    #[inline]
    #[must_use]
    pub fn altitude(&self) -> &str {
        &self.altitude
    }

    #[inline]
    #[must_use]
    pub fn geoid_height(&self) -> &str {
        &self.geoid_height
    }

    #[inline]
    #[must_use]
    pub fn satellites_in_use(&self) -> u16 {
        self.satellites_in_use
    }

    #[inline]
    #[must_use]
    pub fn hdop(&self) -> &str {
        &self.hdop
    }

    /// GGA fix quality. 0 means no fix; any other value means the
    /// receiver has one.
    #[inline]
    #[must_use]
    pub fn fix_status(&self) -> u16 {
        self.fix_status
    }

    #[inline]
    #[must_use]
    pub fn has_fix(&self) -> bool {
        self.fix_status != 0
    }

    #[inline]
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.stats
    }

    /// Commit a decoded sentence.
    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Position(update) => self.apply_position(update),
            Update::Time(update) => self.apply_time(update),
        }
    }

    fn apply_position(&mut self, update: PositionUpdate) {
        if let Some(position) = update.position {
            self.latitude = Some(position.latitude);
            self.longitude = Some(position.longitude);
            self.altitude = position.altitude;
            self.geoid_height = position.geoid_height;
        }
        self.timestamp = update.timestamp;
        self.satellites_in_use = update.satellites_in_use;
        self.hdop = update.hdop;
        self.fix_status = update.fix_status;
    }

    fn apply_time(&mut self, update: TimeUpdate) {
        self.timestamp = update.timestamp;
        self.datestamp = update.datestamp;
    }

    pub(crate) fn count_parsed(&mut self) {
        self.stats.parsed_sentences = self.stats.parsed_sentences.wrapping_add(1);
    }

    pub(crate) fn count_crc_fail(&mut self) {
        self.stats.crc_fails = self.stats.crc_fails.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::gga::Position;

    fn field(s: &str) -> Field {
        Field::try_from(s).unwrap()
    }

    fn coordinate(degrees: &str, minutes: &str, hemisphere: Hemisphere) -> Coordinate {
        Coordinate {
            degrees: field(degrees),
            minutes: field(minutes),
            hemisphere,
        }
    }

    fn position_update(fix_status: u16) -> PositionUpdate {
        PositionUpdate {
            timestamp: Timestamp {
                hours: field("12"),
                minutes: field("35"),
                seconds: field("19"),
            },
            satellites_in_use: 8,
            hdop: field("0.9"),
            fix_status,
            position: (fix_status != 0).then(|| Position {
                latitude: coordinate("48", "07.038", Hemisphere::North),
                longitude: coordinate("011", "31.000", Hemisphere::East),
                altitude: field("545.4"),
                geoid_height: field("46.9"),
            }),
        }
    }

    #[test]
    fn empty_before_first_fix() {
        let fix = FixRecord::new();

        assert_eq!(fix.latitude(), None);
        assert_eq!(fix.latitude_ascii(), "");
        assert_eq!(fix.longitude_ascii(), "");
        assert!(!fix.has_fix());
        assert_eq!(fix.statistics(), Statistics::default());
    }

    #[test]
    fn position_with_fix() {
        let mut fix = FixRecord::new();
        fix.apply(Update::Position(position_update(1)));

        assert_eq!(fix.latitude_ascii(), "4807.038N");
        assert_eq!(fix.longitude_ascii(), "01131.000E");
        assert_eq!(fix.altitude(), "545.4");
        assert_eq!(fix.geoid_height(), "46.9");
        assert_eq!(fix.hdop(), "0.9");
        assert_eq!(fix.satellites_in_use(), 8);
        assert!(fix.has_fix());
    }

    #[test]
    fn losing_the_fix_keeps_the_last_position() {
        let mut fix = FixRecord::new();
        fix.apply(Update::Position(position_update(1)));
        fix.apply(Update::Position(position_update(0)));

        assert!(!fix.has_fix());
        assert_eq!(fix.fix_status(), 0);
        assert_eq!(fix.latitude_ascii(), "4807.038N");
        assert_eq!(fix.altitude(), "545.4");
    }

    #[test]
    fn time_leaves_position_alone() {
        let mut fix = FixRecord::new();
        fix.apply(Update::Position(position_update(1)));
        let before = fix.clone();

        fix.apply(Update::Time(TimeUpdate {
            timestamp: Timestamp {
                hours: field("20"),
                minutes: field("15"),
                seconds: field("30.00"),
            },
            datestamp: Datestamp {
                day: field("04"),
                month: field("07"),
                year: field("2002"),
            },
        }));

        assert_eq!(fix.latitude(), before.latitude());
        assert_eq!(fix.satellites_in_use(), before.satellites_in_use());
        assert_eq!(fix.datestamp().year, "2002");
        assert_eq!(fix.timestamp().hours, "20");
    }

    #[test]
    fn timestamp_display() {
        let ts = Timestamp {
            hours: field("12"),
            minutes: field("35"),
            seconds: field("19"),
        };
        let mut out = String::<16>::new();
        write!(out, "{ts}").unwrap();
        assert_eq!(out, "12:35:19");
    }
}
