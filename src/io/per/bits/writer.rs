use super::{bytes_for_bits, BYTE_LEN};
use crate::io::per::err::Error;

/// Growable bit sink. The buffer always holds exactly `ceil(bit_len / 8)` octets and every bit
/// past `bit_len` is zero, which is what makes [`BitWriter::align_bytes_zero`] a plain jump.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    buffer: Vec<u8>,
    write_position: usize,
}

impl BitWriter {
    pub fn with_capacity(capacity_bytes: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity_bytes),
            write_position: 0,
        }
    }

    #[inline]
    pub fn content(&self) -> &[u8] {
        &self.buffer[..]
    }

    #[inline]
    pub const fn bit_len(&self) -> usize {
        self.write_position
    }

    /// The sub-byte offset in `0..8`.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.write_position % BYTE_LEN
    }

    #[inline]
    pub const fn distance(&self) -> usize {
        self.write_position
    }

    #[inline]
    pub const fn distance_bytes(&self) -> usize {
        bytes_for_bits(self.write_position)
    }

    /// Bits written since `mark`, a previous [`BitWriter::distance`] of this writer.
    #[inline]
    pub const fn distance_from(&self, mark: usize) -> usize {
        self.write_position.saturating_sub(mark)
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    fn reserve_bits(&mut self, bits: usize) -> Result<(), Error> {
        let required = bytes_for_bits(self.write_position + bits);
        let additional = required.saturating_sub(self.buffer.len());
        self.buffer
            .try_reserve(additional)
            .map_err(|_| Error::insufficient_space_in_destination_buffer())
    }

    /// Appends the `bits` least significant bits of `value`, most significant first.
    pub fn pack(&mut self, value: u64, bits: usize) -> Result<(), Error> {
        debug_assert!(bits <= 64);
        if bits == 0 {
            return Ok(());
        }
        self.reserve_bits(bits)?;

        let mut remaining = bits;
        while remaining > 0 {
            let offset = self.write_position % BYTE_LEN;
            if offset == 0 {
                self.buffer.push(0x00);
            }
            let free = BYTE_LEN - offset;
            let take = free.min(remaining);
            let chunk = ((value >> (remaining - take)) & ((1_u64 << take) - 1)) as u8;
            let last = self.buffer.len() - 1;
            self.buffer[last] |= chunk << (free - take);
            self.write_position += take;
            remaining -= take;
        }
        Ok(())
    }

    #[inline]
    pub fn pack_bit(&mut self, bit: bool) -> Result<(), Error> {
        self.pack(u64::from(bit), 1)
    }

    pub fn pack_bytes(&mut self, src: &[u8]) -> Result<(), Error> {
        if self.offset() == 0 {
            self.reserve_bits(src.len() * BYTE_LEN)?;
            self.buffer.extend_from_slice(src);
            self.write_position += src.len() * BYTE_LEN;
            Ok(())
        } else {
            for byte in src {
                self.pack(u64::from(*byte), BYTE_LEN)?;
            }
            Ok(())
        }
    }

    /// Moves to the next octet boundary. Nothing needs to be written, skipped bits are zero.
    #[inline]
    pub fn align_bytes_zero(&mut self) {
        self.write_position = self.buffer.len() * BYTE_LEN;
    }
}
