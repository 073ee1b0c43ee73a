//! Fields of the sentence currently being received.
//!
//! All segments share one fixed text buffer; only the offset at which each
//! segment starts is recorded. Segment 0 is the sentence identifier, the
//! segments after it are the comma separated fields, and the segment opened
//! by `*` collects the checksum digits.

use heapless::{String, Vec};

use crate::sentence::DecodeError;

/// Maximum number of segments in one sentence, checksum included.
pub const SEGMENT_CAPACITY: usize = 24;

/// Bytes outside this range are line noise and never reach a segment.
#[inline]
pub(crate) const fn is_accepted(byte: u8) -> bool {
    matches!(byte, 10..=126)
}

/// A sentence had more text or more segments than fit in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Overflow;

#[derive(Debug, Clone)]
pub struct SegmentBuffer<const N: usize> {
    text: String<N>,
    /// Start offsets of segments 1.., segment 0 always starts at 0.
    bounds: Vec<usize, { SEGMENT_CAPACITY - 1 }>,
    /// Index of the segment holding the checksum, once `*` was seen.
    checksum_at: Option<usize>,
}

impl<const N: usize> Default for SegmentBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SegmentBuffer<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            bounds: Vec::new(),
            checksum_at: None,
        }
    }

    /// Split a sentence body (the text between `$` and the end of the
    /// checksum) the same way the streaming parser does. Bytes the parser
    /// would ignore are skipped.
    ///
    /// ```
    /// # use nmea_stream::SegmentBuffer;
    /// let segments = SegmentBuffer::<90>::split("GPZDA,201530.00,04,07,2002,00,00*60").unwrap();
    /// assert_eq!(segments.get(0), Some("GPZDA"));
    /// assert_eq!(segments.fields().get(4), Ok("2002"));
    /// assert_eq!(segments.get(7), Some("60"));
    /// ```
    pub fn split(body: &str) -> Result<Self, Overflow> {
        let mut segments = Self::new();
        for byte in body.bytes().filter(|b| is_accepted(*b)) {
            match byte {
                b'*' => segments.begin_checksum()?,
                b',' => segments.next_segment()?,
                _ => segments.push(byte)?,
            }
        }
        Ok(segments)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.bounds.clear();
        self.checksum_at = None;
    }

    /// Number of segments opened so far, the active one included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len() + 1
    }

    /// Never true: segment 0 always exists, possibly empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.bounds.len()
    }

    /// Append a byte to the active segment. The byte must be ASCII.
    pub fn push(&mut self, byte: u8) -> Result<(), Overflow> {
        debug_assert!(byte.is_ascii(), "segment text must be ASCII");
        self.text.push(char::from(byte)).map_err(|_| Overflow)
    }

    /// Close the active segment and open an empty one after it.
    pub fn next_segment(&mut self) -> Result<(), Overflow> {
        self.bounds.push(self.text.len()).map_err(|_| Overflow)
    }

    /// Open the segment that receives the checksum digits.
    pub fn begin_checksum(&mut self) -> Result<(), Overflow> {
        self.next_segment()?;
        if self.checksum_at.is_none() {
            self.checksum_at = Some(self.active_index());
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        let start = match index {
            0 => 0,
            _ => *self.bounds.get(index - 1)?,
        };
        let end = self.bounds.get(index).copied().unwrap_or(self.text.len());
        self.text.get(start..end)
    }

    #[must_use]
    pub fn active(&self) -> &str {
        self.get(self.active_index()).unwrap_or_default()
    }

    /// The sentence identifier, e.g. `GPGGA`.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.get(0).unwrap_or_default()
    }

    /// The data fields, without the checksum.
    #[must_use]
    pub fn fields(&self) -> Fields<'_> {
        let len = self.checksum_at.unwrap_or_else(|| self.len());
        Fields {
            text: &self.text,
            bounds: &self.bounds,
            len,
        }
    }
}

/// Read-only view over the data fields of a sentence, handed to decoders.
///
/// Indices are the same as for [`SegmentBuffer::get`]: 0 is the identifier.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    text: &'a str,
    bounds: &'a [usize],
    len: usize,
}

impl<'a> Fields<'a> {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Field `index`, or [`DecodeError::MissingField`] if the sentence ended
    /// before it.
    pub fn get(&self, index: usize) -> Result<&'a str, DecodeError> {
        if index >= self.len {
            return Err(DecodeError::MissingField { index });
        }
        let start = match index {
            0 => 0,
            _ => self.bounds[index - 1],
        };
        let end = self.bounds.get(index).copied().unwrap_or(self.text.len());
        self.text
            .get(start..end)
            .ok_or(DecodeError::MissingField { index })
    }
}
