//! GGA, global positioning fix data.
//!
//! ```text
//! $GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47
//!        |      |        | |         | | |  |   |       |
//!        1      2        3 4         5 6 7  8   9       11
//! ```

use crate::{
    fix::{Coordinate, Field, Hemisphere, Timestamp},
    segments::Fields,
};

use super::{field, number, split_at_most, split_time, DecodeError};

const UTC: usize = 1;
const LATITUDE: usize = 2;
const LONGITUDE: usize = 4;
const FIX_STATUS: usize = 6;
const SATELLITES: usize = 7;
const HDOP: usize = 8;
const ALTITUDE: usize = 9;
const GEOID_HEIGHT: usize = 11;

/// Position part of a GGA sentence, only present with a fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    pub altitude: Field,
    pub geoid_height: Field,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionUpdate {
    pub timestamp: Timestamp,
    pub satellites_in_use: u16,
    pub hdop: Field,
    pub fix_status: u16,
    pub position: Option<Position>,
}

pub fn decode(fields: &Fields<'_>) -> Result<PositionUpdate, DecodeError> {
    let timestamp = split_time(fields.get(UTC)?, UTC)?;
    let satellites_in_use = number(fields, SATELLITES)?;
    let fix_status = number(fields, FIX_STATUS)?;
    let hdop = soft(fields, HDOP, "");

    let position = match fix_status {
        0 => None,
        _ => Some(position(fields)?),
    };

    Ok(PositionUpdate {
        timestamp,
        satellites_in_use,
        hdop,
        fix_status,
        position,
    })
}

fn position(fields: &Fields<'_>) -> Result<Position, DecodeError> {
    Ok(Position {
        latitude: coordinate(fields, LATITUDE, 2)?,
        longitude: coordinate(fields, LONGITUDE, 3)?,
        altitude: soft(fields, ALTITUDE, "0"),
        geoid_height: soft(fields, GEOID_HEIGHT, "0"),
    })
}

/// `dddmm.mmmm` at `index`, hemisphere letter at `index + 1`.
fn coordinate(
    fields: &Fields<'_>,
    index: usize,
    degree_digits: usize,
) -> Result<Coordinate, DecodeError> {
    let (degrees, minutes) = split_at_most(fields.get(index)?, degree_digits);
    let hemisphere = Hemisphere::from_field(fields.get(index + 1)?)
        .ok_or(DecodeError::InvalidHemisphere { index: index + 1 })?;

    Ok(Coordinate {
        degrees: field(degrees, index)?,
        minutes: field(minutes, index)?,
        hemisphere,
    })
}

/// A pass-through field that falls back to `default` instead of failing
/// the sentence.
fn soft(fields: &Fields<'_>, index: usize, default: &str) -> Field {
    fields
        .get(index)
        .ok()
        .and_then(|s| Field::try_from(s).ok())
        .or_else(|| Field::try_from(default).ok())
        .unwrap_or_default()
}
