use crate::io::per::{Error, ErrorKind, BYTE_LEN};
use crate::io::per::bits::bytes_for_bits;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A sequence of bits indexed from `0`. Bit `i` lives in `octets[i / 8]` at bit position `i % 8`
/// (least significant first), so the text form `"1011"` lists the highest index first and that
/// is also the order in which the bits go onto the wire.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct BitString {
    octets: Vec<u8>,
    bit_len: usize,
}

impl BitString {
    pub fn new(bit_len: usize) -> Self {
        Self {
            octets: vec![0_u8; bytes_for_bits(bit_len)],
            bit_len,
        }
    }

    /// Takes octets in the storage order described on [`BitString`]. Bits beyond `bit_len` are
    /// cleared.
    pub fn from_octets(mut octets: Vec<u8>, bit_len: usize) -> Self {
        octets.resize(bytes_for_bits(bit_len), 0x00);
        let mut bits = Self { octets, bit_len };
        bits.clear_unused();
        bits
    }

    /// The `bit_len` least significant bits of `value`, at most 64.
    pub fn from_u64(value: u64, bit_len: usize) -> Self {
        debug_assert!(bit_len <= 64);
        let octets = value.to_le_bytes()[..bytes_for_bits(bit_len)].to_vec();
        Self::from_octets(octets, bit_len)
    }

    /// The bits as number, `None` if there are more than 64.
    pub fn to_u64(&self) -> Option<u64> {
        if self.bit_len > 64 {
            return None;
        }
        let mut bytes = [0_u8; 8];
        bytes[..self.octets.len()].copy_from_slice(&self.octets);
        Some(u64::from_le_bytes(bytes))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bit_len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    #[inline]
    pub fn as_octets(&self) -> &[u8] {
        &self.octets[..]
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index < self.bit_len {
            Some(self.octets[index / BYTE_LEN] & (1 << (index % BYTE_LEN)) != 0)
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// If `index` is not smaller than [`BitString::len`].
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(
            index < self.bit_len,
            "bit index {} out of range for length {}",
            index,
            self.bit_len
        );
        let mask = 1 << (index % BYTE_LEN);
        if value {
            self.octets[index / BYTE_LEN] |= mask;
        } else {
            self.octets[index / BYTE_LEN] &= !mask;
        }
    }

    /// Grows with zero bits or truncates the highest bits.
    pub fn resize(&mut self, bit_len: usize) {
        self.octets.resize(bytes_for_bits(bit_len), 0x00);
        self.bit_len = bit_len;
        self.clear_unused();
    }

    fn clear_unused(&mut self) {
        let used = self.bit_len % BYTE_LEN;
        if used != 0 {
            if let Some(last) = self.octets.last_mut() {
                *last &= (1 << used) - 1;
            }
        }
    }
}

impl FromStr for BitString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = BitString::new(s.len());
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => {}
                '1' => bits.set(s.len() - 1 - position, true),
                _ => return Err(ErrorKind::InvalidBitString(s.to_string()).into()),
            }
        }
        Ok(bits)
    }
}

impl Display for BitString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for index in (0..self.bit_len).rev() {
            let c = if self.get(index) == Some(true) { '1' } else { '0' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl Serialize for BitString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_form_highest_index_first() {
        let bits = BitString::from_str("1011").unwrap();
        assert_eq!(4, bits.len());
        assert_eq!(Some(true), bits.get(0));
        assert_eq!(Some(true), bits.get(1));
        assert_eq!(Some(false), bits.get(2));
        assert_eq!(Some(true), bits.get(3));
        assert_eq!(None, bits.get(4));
        assert_eq!(&[0b1011], bits.as_octets());
        assert_eq!("1011", bits.to_string());
    }

    #[test]
    fn test_invalid_text() {
        assert!(BitString::from_str("10x1").is_err());
    }

    #[test]
    fn test_number_conversion() {
        let bits = BitString::from_u64(0x1_2345, 20);
        assert_eq!(&[0x45, 0x23, 0x01], bits.as_octets());
        assert_eq!(Some(0x1_2345), bits.to_u64());
        assert_eq!("00010010001101000101", bits.to_string());
        assert_eq!(None, BitString::new(65).to_u64());
    }

    #[test]
    fn test_from_u64_truncates() {
        let bits = BitString::from_u64(0xFF, 3);
        assert_eq!(Some(0b111), bits.to_u64());
    }

    #[test]
    fn test_set_and_resize() {
        let mut bits = BitString::new(10);
        bits.set(9, true);
        bits.set(0, true);
        assert_eq!("1000000001", bits.to_string());
        bits.resize(9);
        assert_eq!("000000001", bits.to_string());
        bits.resize(12);
        assert_eq!("000000000001", bits.to_string());
    }
}
