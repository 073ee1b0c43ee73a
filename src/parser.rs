//! The byte-at-a-time state machine.
//!
//! A sentence starts at `$`. Until `*` every byte is folded into the
//! checksum and commas split it into segments; the two bytes after `*` are
//! the checksum itself. As soon as the second of them arrives the sentence
//! is either accepted and dispatched to its decoder, or dropped. Nothing is
//! buffered beyond the current sentence, so the caller may hand bytes over
//! in chunks of any size, with any delay between them.

use crate::{
    checksum::{self, Checksum},
    fix::FixRecord,
    segments::{is_accepted, Overflow, SegmentBuffer},
    sentence::{self, SentenceId},
};

/// Bytes a sentence may take, counted from the byte after `$`, before it is
/// given up on. A sentence still completes on the byte that crosses the
/// limit, so the longest accepted one is `SENTENCE_LIMIT + 1` bytes.
pub const SENTENCE_LIMIT: usize = 90;

const START: u8 = b'$';
const SEPARATOR: u8 = b',';
const CHECKSUM: u8 = b'*';

/// Streaming NMEA 0183 parser. See the [module-level documentation](self).
///
/// `LIMIT` bounds the length of a sentence, and with it the size of the
/// receive buffer.
#[derive(Debug, Clone)]
pub struct Parser<const LIMIT: usize = SENTENCE_LIMIT> {
    active: bool,
    segments: SegmentBuffer<LIMIT>,
    checksum: Checksum,
    char_count: usize,
    fix: FixRecord,
}

impl<const LIMIT: usize> Default for Parser<LIMIT> {
    fn default() -> Self {
        Self::with_limit()
    }
}

impl Parser {
    /// A parser with the default [`SENTENCE_LIMIT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit()
    }
}

impl<const LIMIT: usize> Parser<LIMIT> {
    /// A parser accepting sentences of up to `LIMIT` bytes.
    #[must_use]
    pub fn with_limit() -> Self {
        Self {
            active: false,
            segments: SegmentBuffer::new(),
            checksum: Checksum::new(),
            char_count: 0,
            fix: FixRecord::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn fix(&self) -> &FixRecord {
        &self.fix
    }

    /// True while a sentence is being received.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Process one byte from the receiver.
    ///
    /// Returns the identifier of the sentence this byte completed, if that
    /// sentence passed its checksum and was decoded into the fix record.
    /// Anything else, malformed input included, yields `None`.
    pub fn update(&mut self, byte: u8) -> Option<SentenceId> {
        if !is_accepted(byte) {
            return None;
        }

        if byte == START {
            self.begin();
            return None;
        }

        if !self.active {
            return None;
        }

        self.char_count += 1;
        let result = match self.accumulate(byte) {
            Ok(Some(expected)) => self.complete(expected),
            Ok(None) => None,
            Err(Overflow) => {
                log_trace!("too many segments, sentence discarded");
                self.active = false;
                None
            }
        };

        // the byte crossing the limit may still complete the sentence
        if self.active && self.char_count > LIMIT {
            log_trace!("sentence longer than {} bytes, discarded", LIMIT);
            self.active = false;
        }

        result
    }

    /// Feed a chunk of bytes. The returned iterator yields every sentence
    /// completed within the chunk; bytes after the point where it is dropped
    /// are not processed.
    ///
    /// ```
    /// # use nmea_stream::Parser;
    /// let mut parser = Parser::new();
    /// let chunk = b"$GPZDA,201530.00,04,07,2002,00,00*60\r\n$GPGGA,,,,,,0,00,,,M,,M,,*66\r\n";
    /// let ids: Vec<_> = parser.feed(chunk).map(|id| id.as_str()).collect();
    /// assert_eq!(ids, ["GPZDA", "GPGGA"]);
    /// ```
    pub fn feed<'a>(&'a mut self, bytes: &'a [u8]) -> Feed<'a, LIMIT> {
        Feed {
            parser: self,
            bytes: bytes.iter(),
        }
    }

    fn begin(&mut self) {
        if self.active {
            log_trace!("sentence restarted before completion");
        }
        self.segments.clear();
        self.checksum.reset();
        self.char_count = 0;
        self.active = true;
    }

    /// Store a byte of the active sentence. Returns the transmitted
    /// checksum once both of its digits have arrived.
    fn accumulate(&mut self, byte: u8) -> Result<Option<u8>, Overflow> {
        match byte {
            CHECKSUM => {
                self.checksum.finish();
                self.segments.begin_checksum()?;
            }
            SEPARATOR => {
                self.checksum.feed(byte);
                self.segments.next_segment()?;
            }
            _ => {
                self.segments.push(byte)?;
                if self.checksum.is_enabled() {
                    self.checksum.feed(byte);
                } else if self.segments.active().len() == 2 {
                    let expected = checksum::parse_hex(self.segments.active());
                    if expected.is_none() {
                        log_trace!("malformed checksum field");
                    }
                    return Ok(expected);
                }
            }
        }
        Ok(None)
    }

    fn complete(&mut self, expected: u8) -> Option<SentenceId> {
        self.active = false;

        let computed = self.checksum.value();
        if computed != expected {
            log_debug!(
                "checksum mismatch: expected {:x}, computed {:x}",
                expected,
                computed
            );
            self.fix.count_crc_fail();
            return None;
        }

        let Some(id) = sentence::lookup(self.segments.identifier()) else {
            log_trace!("unknown sentence {}", self.segments.identifier());
            return None;
        };

        match id.kind().decode(&self.segments.fields()) {
            Ok(update) => {
                self.fix.apply(update);
                self.fix.count_parsed();
                log_trace!("decoded {}", id);
                Some(id)
            }
            Err(e) => {
                log_debug!("{} not decoded: {}", id, e);
                None
            }
        }
    }
}

/// Iterator returned by [`Parser::feed`].
pub struct Feed<'a, const LIMIT: usize> {
    parser: &'a mut Parser<LIMIT>,
    bytes: core::slice::Iter<'a, u8>,
}

impl<const LIMIT: usize> Iterator for Feed<'_, LIMIT> {
    type Item = SentenceId;

    fn next(&mut self) -> Option<Self::Item> {
        self.bytes.by_ref().find_map(|b| self.parser.update(*b))
    }
}
