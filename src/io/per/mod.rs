//! ITU-T X.691 | ISO/IEC 8825-2:2015 packed encoding rules.
//!
//! The building blocks in here encode and decode the basic ASN.1 primitives in both the ALIGNED
//! and the UNALIGNED variant. [`PackedWrite`] and [`PackedRead`] define the primitives, which
//! [`PerWriter`] and [`PerReader`] implement for the [`Variant`] chosen at construction.
//! Protocol schemas compose these primitives into concrete message layouts without caring about
//! the variant.

pub mod bits;
pub mod diag;
pub mod err;

mod bitstring;
mod enumerated;
mod length;
mod number;
mod octetstring;
mod open_type;
mod reader;
mod real;
mod writer;

pub use bits::{BitReader, BitWriter, BYTE_LEN};
pub use diag::{DiagnosticSink, LogSink, NoopSink};
pub use err::{Category, Direction, Error, ErrorKind, Limit};
pub use reader::PerReader;
pub use writer::PerWriter;

use crate::syn::bitstring::BitString;
use crate::syn::numbers::WholeNumber;

/// Largest length of the single octet (or 7 bit) length determinant form, X.691 11.9.3.6
pub const LENGTH_DET_L1: u64 = 127;
/// Largest length of the two octet (or 14 bit) length determinant form, X.691 11.9.3.7
pub const LENGTH_DET_L2: u64 = 16 * 1024 - 1;
/// Upper bounds at or above this are encoded as unconstrained lengths, X.691 11.9.4.1
pub const LENGTH_BOUND_LIMIT: u64 = 64 * 1024;
/// Largest normally small non-negative whole number this codec handles, X.691 11.6.1
pub const NORMALLY_SMALL_LIMIT: u64 = 63;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Variant {
    /// Octet-aligned fields are padded to the next octet boundary.
    Aligned,
    /// Every field is bit-packed.
    #[default]
    Unaligned,
}

impl Variant {
    #[inline]
    pub const fn is_aligned(self) -> bool {
        matches!(self, Variant::Aligned)
    }
}

pub trait PackedWrite {
    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 12, the boolean type is
    /// represented through a single bit, where 1 represents `true` and 0 represents `false`.
    fn write_boolean(&mut self, value: bool) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 24, the null type has no
    /// encoding at all.
    #[inline]
    fn write_null(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.5, the offset of `value` to
    /// the lower bound in as few bits (UNALIGNED) or octets (ALIGNED) as the range needs.
    fn write_constrained_whole_number(
        &mut self,
        lower_bound: i128,
        upper_bound: i128,
        value: i128,
    ) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.7, the offset of `value` to
    /// the lower bound in octets, prefixed with their count.
    fn write_semi_constrained_whole_number(
        &mut self,
        lower_bound: i128,
        value: i128,
    ) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.8, the shortest two's
    /// complement octets of `value`, prefixed with their count.
    fn write_unconstrained_whole_number(&mut self, value: i128) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 13, an integer under any
    /// combination of bounds, optionally extensible.
    fn write_whole_number(
        &mut self,
        lower_bound: Option<i128>,
        upper_bound: Option<i128>,
        extensible: bool,
        value: i128,
    ) -> Result<(), Error>;

    /// [`PackedWrite::write_whole_number`] for a typed integer field
    #[inline]
    fn write_integer<N: WholeNumber>(
        &mut self,
        lower_bound: Option<N>,
        upper_bound: Option<N>,
        extensible: bool,
        value: N,
    ) -> Result<(), Error> {
        self.write_whole_number(
            lower_bound.map(N::to_i128),
            upper_bound.map(N::to_i128),
            extensible,
            value.to_i128(),
        )
    }

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.9, the length determinant
    /// counts bits, octets or components.
    fn write_length_determinant(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        length: u64,
    ) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 20.6, the component count of a
    /// SEQUENCE OF.
    fn write_sequence_of_len(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
        len: u64,
    ) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.6, an unbounded number that
    /// is likely to be small.
    fn write_normally_small_non_negative_whole_number(&mut self, value: u64) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.9.3.4, a length of at least
    /// one that is likely to be small.
    fn write_normally_small_length(&mut self, length: u64) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 14. `extension_variants` is
    /// `None` for enumerations without extension marker.
    fn write_enumeration_index(
        &mut self,
        std_variants: u64,
        extension_variants: Option<u64>,
        index: u64,
    ) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 23.6 to 23.8
    fn write_choice_index(
        &mut self,
        std_variants: u64,
        extensible: bool,
        index: u64,
    ) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 16
    fn write_bitstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
        value: &BitString,
    ) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 17
    fn write_octetstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
        value: &[u8],
    ) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 15, in the binary encoding of
    /// ITU-T X.690 8.5.7.
    fn write_real(&mut self, value: f32) -> Result<(), Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.2, embeds an already complete
    /// encoding as an open type.
    fn write_open_type_bytes(&mut self, encoded: &[u8]) -> Result<(), Error>;
}

pub trait PackedRead {
    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 12, the boolean type is
    /// represented through a single bit, where 1 represents `true` and 0 represents `false`.
    fn read_boolean(&mut self) -> Result<bool, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 24
    #[inline]
    fn read_null(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.5. Offsets beyond the upper
    /// bound are rejected.
    fn read_constrained_whole_number(
        &mut self,
        lower_bound: i128,
        upper_bound: i128,
    ) -> Result<i128, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.7
    fn read_semi_constrained_whole_number(&mut self, lower_bound: i128) -> Result<i128, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.8
    fn read_unconstrained_whole_number(&mut self) -> Result<i128, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 13, for any combination of
    /// bounds. The decoded value is checked against the bounds also when the encoding does not
    /// reflect them.
    fn read_whole_number(
        &mut self,
        lower_bound: Option<i128>,
        upper_bound: Option<i128>,
        extensible: bool,
    ) -> Result<i128, Error>;

    /// [`PackedRead::read_whole_number`] for a typed integer field. Values that do not fit into
    /// `N` are rejected.
    fn read_integer<N: WholeNumber>(
        &mut self,
        lower_bound: Option<N>,
        upper_bound: Option<N>,
        extensible: bool,
    ) -> Result<N, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.9
    fn read_length_determinant(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
    ) -> Result<u64, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 20.6
    fn read_sequence_of_len(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
    ) -> Result<u64, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.6
    fn read_normally_small_non_negative_whole_number(&mut self) -> Result<u64, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.9.3.4
    fn read_normally_small_length(&mut self) -> Result<u64, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 14. Indices beyond the known
    /// variants are rejected, also for extension values.
    fn read_enumeration_index(
        &mut self,
        std_variants: u64,
        extension_variants: Option<u64>,
    ) -> Result<u64, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 23.6 to 23.8. Extension indices
    /// are returned as is, the caller decides whether it knows the alternative.
    fn read_choice_index(&mut self, std_variants: u64, extensible: bool) -> Result<u64, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 16
    fn read_bitstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
    ) -> Result<BitString, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 17
    fn read_octetstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
    ) -> Result<Vec<u8>, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 15
    fn read_real(&mut self) -> Result<f32, Error>;

    /// According to ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.2, the raw octets of an open
    /// type.
    fn read_open_type_bytes(&mut self) -> Result<Vec<u8>, Error>;

    /// Skips an open type without looking at its content, returns its length in octets.
    fn skip_open_type(&mut self) -> Result<usize, Error>;
}

/// Number of bits needed to represent all values in `0..=max`, which is `ceil(log2(max + 1))`.
#[inline]
pub(crate) const fn bit_width(max: u128) -> usize {
    (u128::BITS - max.leading_zeros()) as usize
}
