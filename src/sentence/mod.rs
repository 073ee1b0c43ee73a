//! Sentence identifiers and the decoders behind them.
//!
//! A sentence identifier is a two letter talker (`GP`, `GL`, `GN`) followed
//! by a three letter sentence type. Only GGA and ZDA carry data this crate
//! keeps; the other well known types are recognised so that they can be
//! told apart from garbage, but always fail to decode.

use core::fmt;

use crate::{
    fix::{Field, Timestamp},
    segments::Fields,
};

pub mod gga;
pub mod zda;

pub use gga::PositionUpdate;
pub use zda::TimeUpdate;

/// Why a checksum-valid sentence did not update the fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The sentence type is recognised but not decoded.
    Unsupported,
    /// The sentence ended before field `index`.
    MissingField { index: usize },
    /// Field `index` should be an unsigned integer.
    InvalidNumber { index: usize },
    /// Field `index` is not one of `N`, `S`, `E`, `W`.
    InvalidHemisphere { index: usize },
    /// Field `index` does not fit in a [`Field`].
    FieldTooLong { index: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("unsupported sentence"),
            Self::MissingField { index } => write!(f, "field {index} is missing"),
            Self::InvalidNumber { index } => write!(f, "field {index} is not a number"),
            Self::InvalidHemisphere { index } => write!(f, "field {index} is not a hemisphere"),
            Self::FieldTooLong { index } => write!(f, "field {index} is too long"),
        }
    }
}

impl core::error::Error for DecodeError {}

/// The sentence types in the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceKind {
    /// Global positioning fix data.
    Gga,
    /// UTC time and date.
    Zda,
    Rmc,
    Vtg,
    Gsa,
    Gsv,
    Gll,
}

impl SentenceKind {
    /// Interpret the fields of a checksum-valid sentence of this kind.
    ///
    /// Decoding never touches the fix record; the returned [`Update`] is
    /// applied in one go by [`crate::FixRecord::apply`].
    pub fn decode(self, fields: &Fields<'_>) -> Result<Update, DecodeError> {
        match self {
            Self::Gga => gga::decode(fields).map(Update::Position),
            Self::Zda => zda::decode(fields).map(Update::Time),
            Self::Rmc | Self::Vtg | Self::Gsa | Self::Gsv | Self::Gll => {
                Err(DecodeError::Unsupported)
            }
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Gga | Self::Zda)
    }
}

/// A successfully decoded sentence, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Position(PositionUpdate),
    Time(TimeUpdate),
}

/// Identifier of a sentence in the dispatch table.
///
/// Compares equal to its string form:
///
/// ```
/// # use nmea_stream::{lookup, SentenceKind};
/// let id = lookup("GNZDA").unwrap();
/// assert_eq!(id, "GNZDA");
/// assert_eq!(id.talker(), "GN");
/// assert_eq!(id.kind(), SentenceKind::Zda);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceId {
    name: &'static str,
    kind: SentenceKind,
}

impl SentenceId {
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.name
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> SentenceKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn talker(self) -> &'static str {
        self.name.get(..2).unwrap_or_default()
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SentenceId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name)
    }
}

impl PartialEq<str> for SentenceId {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for SentenceId {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl AsRef<str> for SentenceId {
    fn as_ref(&self) -> &str {
        self.name
    }
}

const fn entry(name: &'static str, kind: SentenceKind) -> SentenceId {
    SentenceId { name, kind }
}

/// Every identifier this parser knows, and what decodes it.
pub static SENTENCES: [SentenceId; 20] = [
    entry("GPGGA", SentenceKind::Gga),
    entry("GLGGA", SentenceKind::Gga),
    entry("GNGGA", SentenceKind::Gga),
    entry("GPZDA", SentenceKind::Zda),
    entry("GLZDA", SentenceKind::Zda),
    entry("GNZDA", SentenceKind::Zda),
    entry("GPRMC", SentenceKind::Rmc),
    entry("GLRMC", SentenceKind::Rmc),
    entry("GNRMC", SentenceKind::Rmc),
    entry("GPVTG", SentenceKind::Vtg),
    entry("GLVTG", SentenceKind::Vtg),
    entry("GNVTG", SentenceKind::Vtg),
    entry("GPGSA", SentenceKind::Gsa),
    entry("GLGSA", SentenceKind::Gsa),
    entry("GNGSA", SentenceKind::Gsa),
    entry("GPGSV", SentenceKind::Gsv),
    entry("GLGSV", SentenceKind::Gsv),
    entry("GPGLL", SentenceKind::Gll),
    entry("GLGLL", SentenceKind::Gll),
    entry("GNGLL", SentenceKind::Gll),
];

/// Find `identifier` in the dispatch table.
#[must_use]
pub fn lookup(identifier: &str) -> Option<SentenceId> {
    SENTENCES.iter().copied().find(|id| id.name == identifier)
}

/// Split an `hhmmss[.sss]` UTC time into hours, minutes and seconds. An
/// empty field means the receiver has no time yet and reads as
/// `("0", "0", "0.0")`.
pub(crate) fn split_time(utc: &str, index: usize) -> Result<Timestamp, DecodeError> {
    if utc.is_empty() {
        return Ok(Timestamp {
            hours: field("0", index)?,
            minutes: field("0", index)?,
            seconds: field("0.0", index)?,
        });
    }

    let (hours, rest) = split_at_most(utc, 2);
    let (minutes, seconds) = split_at_most(rest, 2);
    Ok(Timestamp {
        hours: field(hours, index)?,
        minutes: field(minutes, index)?,
        seconds: field(seconds, index)?,
    })
}

/// Split after `n` bytes, or at the end if `s` is shorter.
pub(crate) fn split_at_most(s: &str, n: usize) -> (&str, &str) {
    let n = n.min(s.len());
    if s.is_char_boundary(n) {
        s.split_at(n)
    } else {
        (s, "")
    }
}

/// Copy field text into a fixed-capacity [`Field`].
pub(crate) fn field(s: &str, index: usize) -> Result<Field, DecodeError> {
    Field::try_from(s).map_err(|_| DecodeError::FieldTooLong { index })
}

/// Parse an unsigned integer field.
pub(crate) fn number(fields: &Fields<'_>, index: usize) -> Result<u16, DecodeError> {
    fields
        .get(index)?
        .trim()
        .parse()
        .map_err(|_| DecodeError::InvalidNumber { index })
}
