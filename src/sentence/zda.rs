//! ZDA, UTC time and date.
//!
//! ```text
//! $GPZDA,201530.00,04,07,2002,00,00*60
//!        |         |  |  |
//!        1         2  3  4
//! ```

use crate::{
    fix::{Datestamp, Timestamp},
    segments::Fields,
};

use super::{field, split_time, DecodeError};

const UTC: usize = 1;
const DAY: usize = 2;
const MONTH: usize = 3;
const YEAR: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeUpdate {
    pub timestamp: Timestamp,
    pub datestamp: Datestamp,
}

pub fn decode(fields: &Fields<'_>) -> Result<TimeUpdate, DecodeError> {
    parse(fields).inspect_err(|e| log_warn!("failed to parse ZDA: {}", e))
}

fn parse(fields: &Fields<'_>) -> Result<TimeUpdate, DecodeError> {
    let timestamp = split_time(fields.get(UTC)?, UTC)?;
    let datestamp = Datestamp {
        day: field(fields.get(DAY)?, DAY)?,
        month: field(fields.get(MONTH)?, MONTH)?,
        year: field(fields.get(YEAR)?, YEAR)?,
    };

    Ok(TimeUpdate {
        timestamp,
        datestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SegmentBuffer;

    fn decode_body(body: &str) -> Result<TimeUpdate, DecodeError> {
        let segments = SegmentBuffer::<90>::split(body).unwrap();
        decode(&segments.fields())
    }

    #[test]
    fn time_and_date() {
        let update = decode_body("GNZDA,195027.000,07,09,2025,,*4B").unwrap();

        assert_eq!(update.timestamp.hours, "19");
        assert_eq!(update.timestamp.minutes, "50");
        assert_eq!(update.timestamp.seconds, "27.000");
        assert_eq!(update.datestamp.day, "07");
        assert_eq!(update.datestamp.month, "09");
        assert_eq!(update.datestamp.year, "2025");
    }

    #[test]
    fn no_time_yet() {
        let update = decode_body("GPZDA,,,,,,*48").unwrap();

        assert_eq!(update.timestamp.hours, "0");
        assert_eq!(update.timestamp.seconds, "0.0");
        assert_eq!(update.datestamp.year, "");
    }

    #[test]
    fn checksum_is_never_the_year() {
        assert_eq!(
            decode_body("GPZDA,201530.00,04,07*4C"),
            Err(DecodeError::MissingField { index: YEAR })
        );
    }
}
