use super::{bytes_for_bits, BYTE_LEN};
use crate::io::per::err::Error;

/// Bounded cursor over a borrowed octet view. The position never passes `end`, every read
/// checks the remaining length first and fails without moving the cursor.
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
    end: usize,
}

impl<'a> BitReader<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            end: data.len() * BYTE_LEN,
        }
    }

    /// Only the first `bit_len` bits of `data` are readable.
    pub fn from_bits(data: &'a [u8], bit_len: usize) -> Self {
        Self {
            data,
            position: 0,
            end: bit_len.min(data.len() * BYTE_LEN),
        }
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.end - self.position
    }

    #[inline]
    pub const fn offset(&self) -> usize {
        self.position % BYTE_LEN
    }

    /// Absolute bit position within the underlying buffer.
    #[inline]
    pub const fn distance(&self) -> usize {
        self.position
    }

    #[inline]
    pub const fn distance_bytes(&self) -> usize {
        bytes_for_bits(self.position)
    }

    /// Bits between `earlier` and this cursor, both over the same buffer.
    #[inline]
    pub const fn distance_from(&self, earlier: &BitReader<'_>) -> usize {
        self.position.saturating_sub(earlier.position)
    }

    #[inline]
    fn ensure_remaining(&self, bits: usize) -> Result<(), Error> {
        if self.remaining() < bits {
            Err(Error::end_of_stream(bits, self.remaining()))
        } else {
            Ok(())
        }
    }

    pub fn unpack(&mut self, bits: usize) -> Result<u64, Error> {
        debug_assert!(bits <= 64);
        self.ensure_remaining(bits)?;

        let mut value = 0_u64;
        let mut remaining = bits;
        while remaining > 0 {
            let available = BYTE_LEN - (self.position % BYTE_LEN);
            let take = available.min(remaining);
            let byte = self.data[self.position / BYTE_LEN];
            let chunk = (byte >> (available - take)) & (((1_u16 << take) - 1) as u8);
            value = (value << take) | u64::from(chunk);
            self.position += take;
            remaining -= take;
        }
        Ok(value)
    }

    #[inline]
    pub fn unpack_bit(&mut self) -> Result<bool, Error> {
        Ok(self.unpack(1)? == 1)
    }

    pub fn unpack_bytes(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        self.ensure_remaining(dst.len() * BYTE_LEN)?;
        if self.offset() == 0 {
            let start = self.position / BYTE_LEN;
            dst.copy_from_slice(&self.data[start..start + dst.len()]);
            self.position += dst.len() * BYTE_LEN;
        } else {
            for byte in dst.iter_mut() {
                *byte = self.unpack(BYTE_LEN)? as u8;
            }
        }
        Ok(())
    }

    /// Lands on the current octet boundary or advances to the next one.
    pub fn align_bytes(&mut self) -> Result<(), Error> {
        let padding = (BYTE_LEN - self.offset()) % BYTE_LEN;
        self.advance_bits(padding)
    }

    pub fn advance_bits(&mut self, bits: usize) -> Result<(), Error> {
        self.ensure_remaining(bits)?;
        self.position += bits;
        Ok(())
    }

    #[inline]
    pub fn advance_bytes(&mut self, bytes: usize) -> Result<(), Error> {
        self.advance_bits(bytes * BYTE_LEN)
    }

    /// Carves a reader over `len_bytes` octets starting `offset_bytes` octets after the current
    /// position. The parent cursor does not move.
    pub fn subview(&self, offset_bytes: usize, len_bytes: usize) -> Result<BitReader<'a>, Error> {
        let start = offset_bytes * BYTE_LEN;
        let len = len_bytes * BYTE_LEN;
        self.ensure_remaining(start + len)?;
        Ok(BitReader {
            data: self.data,
            position: self.position + start,
            end: self.position + start + len,
        })
    }
}
