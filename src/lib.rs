//! This crate provides a streaming parser for NMEA 0183 sentences, the ASCII
//! protocol spoken by practically every GPS receiver. It uses no heap
//! allocation whatsoever and is meant to sit right behind a UART on a small
//! microcontroller: bytes are handed over one at a time, in whatever chunks
//! the serial driver produces, and the parser reports each sentence that
//! passed its checksum and updated the [`FixRecord`].
//!
//! Only GGA (position fix) and ZDA (time and date) sentences are decoded.
//! Coordinates are kept as the text the receiver sent, split into degrees,
//! minutes and hemisphere, instead of being converted to floats.
//!
//! ```
//! use nmea_stream::Parser;
//!
//! let mut parser = Parser::new();
//! let mut last = None;
//! let chunks: [&[u8]; 2] = [
//!     b"$GPGGA,123519,4807.038,N,01131.000,E,",
//!     b"1,08,0.9,545.4,M,46.9,M,,*47\r\n",
//! ];
//! for chunk in chunks {
//!     for byte in chunk {
//!         if let Some(id) = parser.update(*byte) {
//!             last = Some(id);
//!         }
//!     }
//! }
//!
//! assert_eq!(last.unwrap(), "GPGGA");
//! assert_eq!(parser.fix().latitude_ascii(), "4807.038N");
//! assert_eq!(parser.fix().longitude_ascii(), "01131.000E");
//! assert_eq!(parser.fix().satellites_in_use(), 8);
//! ```

#![no_std]

mod fmt;

pub mod checksum;
#[cfg(feature = "client")]
pub mod client;
pub mod clock;
mod fix;
mod parser;
pub mod segments;
pub mod sentence;

pub use fix::{
    Coordinate, Datestamp, Field, FixRecord, Hemisphere, Statistics, Timestamp,
    COORDINATE_CAPACITY, FIELD_CAPACITY,
};
pub use parser::{Feed, Parser, SENTENCE_LIMIT};
pub use segments::{Fields, SegmentBuffer, SEGMENT_CAPACITY};
pub use sentence::{
    gga::Position, lookup, DecodeError, PositionUpdate, SentenceId, SentenceKind, TimeUpdate,
    Update,
};
