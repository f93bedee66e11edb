//! The bit cursor pair every PER primitive works through. Bits are always written and read
//! most-significant first.

mod reader;
mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;

pub const BYTE_LEN: usize = 8;

#[inline]
pub(crate) const fn bytes_for_bits(bits: usize) -> usize {
    (bits + BYTE_LEN - 1) / BYTE_LEN
}
