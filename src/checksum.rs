//! The NMEA 0183 checksum is the XOR of every byte between the `$` start
//! delimiter and the `*` that introduces the two hex digits of the checksum
//! field. Neither delimiter takes part in it.

/// Running XOR over the bytes of one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Checksum {
    acc: u8,
    enabled: bool,
}

impl Default for Checksum {
    fn default() -> Self {
        Self::new()
    }
}

impl Checksum {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            acc: 0,
            enabled: true,
        }
    }

    /// Start accumulating a new sentence.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// XOR `byte` into the accumulator, unless [`Checksum::finish`] has
    /// been called since the last reset.
    #[inline]
    pub fn feed(&mut self, byte: u8) {
        if self.enabled {
            self.acc ^= byte;
        }
    }

    /// Stop accumulating. Called when the `*` delimiter is seen.
    #[inline]
    pub fn finish(&mut self) {
        self.enabled = false;
    }

    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.acc
    }
}

/// Compute the checksum of a sentence body, i.e. everything between `$` and
/// `*`.
///
/// ```
/// # use nmea_stream::checksum::checksum;
/// assert_eq!(checksum(b"GNZDA,195027.000,07,09,2025,,"), 0x4b);
/// ```
#[must_use]
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0, |acc, b| acc ^ b)
}

/// Parse a checksum field. Exactly two ASCII hex digits, either case.
#[must_use]
pub fn parse_hex(field: &str) -> Option<u8> {
    match field.as_bytes() {
        [hi, lo] => Some((hex_nibble(*hi)? << 4) | hex_nibble(*lo)?),
        _ => None,
    }
}

const fn hex_nibble(symbol: u8) -> Option<u8> {
    match symbol {
        b'0'..=b'9' => Some(symbol - b'0'),
        b'a'..=b'f' => Some(symbol - b'a' + 10),
        b'A'..=b'F' => Some(symbol - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_until_finished() {
        let mut cs = Checksum::new();
        for b in b"GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,," {
            cs.feed(*b);
        }
        cs.finish();
        cs.feed(b'4');
        cs.feed(b'7');

        assert!(!cs.is_enabled());
        assert_eq!(cs.value(), 0x47);
    }

    #[test]
    fn separators_are_part_of_the_sum() {
        // odd number of commas, so leaving them out would give a different value
        assert_eq!(checksum(b"GNGLL,4315.68533,N,07955.20234,W,080023.000,A,A"), 0x5d);
        assert_eq!(checksum(b"GNGLL4315.68533N07955.20234W080023.000AA"), 0x71);
    }

    #[test]
    fn reset_starts_over() {
        let mut cs = Checksum::new();
        cs.feed(0x55);
        cs.finish();
        cs.reset();

        assert!(cs.is_enabled());
        assert_eq!(cs.value(), 0);
    }

    #[test]
    fn hex_field() {
        assert_eq!(parse_hex("47"), Some(0x47));
        assert_eq!(parse_hex("4b"), Some(0x4b));
        assert_eq!(parse_hex("4B"), Some(0x4b));
        assert_eq!(parse_hex("+5"), None);
        assert_eq!(parse_hex("G0"), None);
        assert_eq!(parse_hex("4"), None);
        assert_eq!(parse_hex("470"), None);
    }
}
