//! Growable bit buffer used by the index generation function.
//!
//! Bits are appended byte-at-a-time and packed LSB-first: the first
//! appended bit is the lowest bit of the first byte.

/// An append-only sequence of bits backed by a byte vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitString {
    bytes: Vec<u8>,
    /// Number of used bits in the final byte, in `1..=8` (0 when empty)
    last_byte_bits: u32,
}

impl BitString {
    /// Create an empty bit string
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of bits stored
    pub fn len_bits(&self) -> usize {
        if self.bytes.is_empty() {
            0
        } else {
            (self.bytes.len() - 1) * 8 + self.last_byte_bits as usize
        }
    }

    /// Append all bits of `bytes`, one byte at a time
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.append_byte(b);
        }
    }

    /// Append the 8 bits of `b`, low bit first
    pub fn append_byte(&mut self, b: u8) {
        if self.bytes.is_empty() || self.last_byte_bits == 8 {
            self.bytes.push(b);
            self.last_byte_bits = 8;
        } else {
            let used = self.last_byte_bits;
            let last = self.bytes.len() - 1;
            self.bytes[last] |= b << used;
            self.bytes.push(b >> (8 - used));
        }
    }

    /// The lowest `num_bits` bits as a new `BitString`
    pub fn trailing(&self, num_bits: usize) -> BitString {
        assert!(num_bits <= self.len_bits());
        let num_bytes = (num_bits + 7) / 8;
        let mut bytes = self.bytes[..num_bytes].to_vec();
        let mut last_byte_bits = (num_bits % 8) as u32;
        if last_byte_bits == 0 {
            last_byte_bits = 8;
        } else {
            let mask = (1u8 << last_byte_bits) - 1;
            bytes[num_bytes - 1] &= mask;
        }
        if num_bits == 0 {
            return BitString::new();
        }
        BitString {
            bytes,
            last_byte_bits,
        }
    }

    /// The highest `num_bits` bits as an integer, `num_bits <= 32`
    pub fn leading_as_u32(&self, num_bits: usize) -> u32 {
        assert!(num_bits <= 32 && num_bits <= self.len_bits());
        let start_bit = self.len_bits() - num_bits;
        let start_byte = start_bit / 8;
        let offset = (start_bit % 8) as u32;
        let mut sum = (self.bytes[start_byte] >> offset) as u32;
        let mut shift = 8 - offset;
        for &b in &self.bytes[start_byte + 1..] {
            sum |= (b as u32) << shift;
            shift += 8;
        }
        if num_bits < 32 {
            sum &= (1u32 << num_bits) - 1;
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_byte() {
        let mut bs = BitString::new();
        bs.append_byte(0x78);
        assert_eq!(bs.bytes, vec![0x78]);
        assert_eq!(bs.len_bits(), 8);

        bs.append_byte(0x9a);
        assert_eq!(bs.bytes, vec![0x78, 0x9a]);
        assert_eq!(bs.len_bits(), 16);
    }

    #[test]
    fn test_trailing() {
        let mut bs = BitString::new();
        bs.append_byte(0x78);
        bs.append_byte(0x9a);

        let t = bs.trailing(12);
        assert_eq!(t.bytes, vec![0x78, 0x0a]);
        assert_eq!(t.len_bits(), 12);

        let t8 = bs.trailing(8);
        assert_eq!(t8.bytes, vec![0x78]);
        assert_eq!(t8.len_bits(), 8);
    }

    #[test]
    fn test_leading_as_u32() {
        let mut bs = BitString::new();
        bs.append_byte(0x78);
        bs.append_byte(0x9a);
        // bits (high to low): 0x9a78 = 1001_1010_0111_1000
        assert_eq!(bs.leading_as_u32(16), 0x9a78);
        assert_eq!(bs.leading_as_u32(4), 0x9);
        assert_eq!(bs.leading_as_u32(12), 0x9a7);
    }

    #[test]
    fn test_partial_byte_append() {
        let mut bs = BitString::new();
        bs.append_byte(0xff);
        let mut t = bs.trailing(3);
        assert_eq!(t.bytes, vec![0x07]);
        // appending to a partial byte splits across the boundary
        t.append_byte(0xff);
        assert_eq!(t.len_bits(), 11);
        assert_eq!(t.leading_as_u32(11), 0x7ff);
    }
}
