use crate::io::per::bits::BitReader;
use crate::io::per::diag::{default_sink, DiagnosticSink};
use crate::io::per::err::{Direction, Error};
use crate::io::per::{PackedRead, Variant};
use crate::syn::bitstring::BitString;
use crate::syn::numbers::WholeNumber;
use std::sync::Arc;

/// Decoding front end over a borrowed octet view.
pub struct PerReader<'a> {
    pub(crate) bits: BitReader<'a>,
    variant: Variant,
    sink: Arc<dyn DiagnosticSink>,
}

impl<'a> PerReader<'a> {
    pub fn new(variant: Variant, data: &'a [u8]) -> Self {
        Self::from_bit_reader(variant, BitReader::new(data))
    }

    pub fn from_bits(variant: Variant, data: &'a [u8], bit_len: usize) -> Self {
        Self::from_bit_reader(variant, BitReader::from_bits(data, bit_len))
    }

    pub fn from_bit_reader(variant: Variant, bits: BitReader<'a>) -> Self {
        Self {
            bits,
            variant,
            sink: default_sink(),
        }
    }

    #[inline]
    pub fn aligned(data: &'a [u8]) -> Self {
        Self::new(Variant::Aligned, data)
    }

    #[inline]
    pub fn unaligned(data: &'a [u8]) -> Self {
        Self::new(Variant::Unaligned, data)
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    #[inline]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub const fn is_aligned(&self) -> bool {
        self.variant.is_aligned()
    }

    #[inline]
    pub fn bits(&self) -> &BitReader<'a> {
        &self.bits
    }

    #[inline]
    pub fn bits_mut(&mut self) -> &mut BitReader<'a> {
        &mut self.bits
    }

    #[inline]
    pub const fn bits_remaining(&self) -> usize {
        self.bits.remaining()
    }

    /// Reports a failed `operation` to the diagnostic sink and tags the error as a decoding
    /// failure. Errors already tagged by a nested operation have been reported there and only
    /// pass through. Successful results pass through untouched.
    #[inline]
    pub(crate) fn trace<T>(
        &self,
        operation: &'static str,
        result: Result<T, Error>,
    ) -> Result<T, Error> {
        result.map_err(|e| {
            if e.direction().is_some() {
                return e;
            }
            let e = e.with_direction(Direction::Decode);
            self.sink.failure(Direction::Decode, operation, &e);
            e
        })
    }

    /// Skips to the next octet boundary in the ALIGNED variant, no-op otherwise.
    #[inline]
    pub(crate) fn align(&mut self) -> Result<(), Error> {
        if self.is_aligned() {
            self.bits.align_bytes()
        } else {
            Ok(())
        }
    }

    #[inline]
    pub(crate) fn swap_bits(&mut self, bits: BitReader<'a>) -> BitReader<'a> {
        core::mem::replace(&mut self.bits, bits)
    }
}

impl<'a> PackedRead for PerReader<'a> {
    #[inline]
    fn read_boolean(&mut self) -> Result<bool, Error> {
        let result = self.bits.unpack_bit();
        self.trace("boolean", result)
    }

    fn read_constrained_whole_number(
        &mut self,
        lower_bound: i128,
        upper_bound: i128,
    ) -> Result<i128, Error> {
        let result = self.constrained_whole_number(lower_bound, upper_bound);
        self.trace("constrained whole number", result)
    }

    fn read_semi_constrained_whole_number(&mut self, lower_bound: i128) -> Result<i128, Error> {
        let result = self.semi_constrained_whole_number(lower_bound);
        self.trace("semi-constrained whole number", result)
    }

    fn read_unconstrained_whole_number(&mut self) -> Result<i128, Error> {
        let result = self.unconstrained_whole_number();
        self.trace("unconstrained whole number", result)
    }

    fn read_whole_number(
        &mut self,
        lower_bound: Option<i128>,
        upper_bound: Option<i128>,
        extensible: bool,
    ) -> Result<i128, Error> {
        let result = self.whole_number(lower_bound, upper_bound, extensible);
        self.trace("whole number", result)
    }

    fn read_integer<N: WholeNumber>(
        &mut self,
        lower_bound: Option<N>,
        upper_bound: Option<N>,
        extensible: bool,
    ) -> Result<N, Error> {
        let value = self.read_whole_number(
            lower_bound.map(N::to_i128),
            upper_bound.map(N::to_i128),
            extensible,
        )?;
        let result =
            N::from_i128(value).ok_or_else(|| Error::value_not_in_range(value, N::MIN, N::MAX));
        self.trace("integer", result)
    }

    fn read_length_determinant(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
    ) -> Result<u64, Error> {
        let result = self.length_determinant(lower_bound, upper_bound);
        self.trace("length determinant", result)
    }

    fn read_sequence_of_len(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
    ) -> Result<u64, Error> {
        let result = self
            .size(lower_bound, upper_bound, extensible)
            .map(|(len, _)| len);
        self.trace("sequence of length", result)
    }

    fn read_normally_small_non_negative_whole_number(&mut self) -> Result<u64, Error> {
        let result = self.normally_small_non_negative_whole_number();
        self.trace("normally small non-negative whole number", result)
    }

    fn read_normally_small_length(&mut self) -> Result<u64, Error> {
        let result = self.normally_small_length();
        self.trace("normally small length", result)
    }

    fn read_enumeration_index(
        &mut self,
        std_variants: u64,
        extension_variants: Option<u64>,
    ) -> Result<u64, Error> {
        let result = self.enumeration_index(std_variants, extension_variants);
        self.trace("enumeration index", result)
    }

    fn read_choice_index(&mut self, std_variants: u64, extensible: bool) -> Result<u64, Error> {
        let result = self.choice_index(std_variants, extensible);
        self.trace("choice index", result)
    }

    fn read_bitstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
    ) -> Result<BitString, Error> {
        let result = self.bitstring(lower_bound, upper_bound, extensible);
        self.trace("bit string", result)
    }

    fn read_octetstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
    ) -> Result<Vec<u8>, Error> {
        let result = self.octetstring(lower_bound, upper_bound, extensible);
        self.trace("octet string", result)
    }

    fn read_real(&mut self) -> Result<f32, Error> {
        let result = self.real();
        self.trace("real", result)
    }

    fn read_open_type_bytes(&mut self) -> Result<Vec<u8>, Error> {
        let result = self.open_type_bytes();
        self.trace("open type", result)
    }

    fn skip_open_type(&mut self) -> Result<usize, Error> {
        let result = self.skip_open_type_frame();
        self.trace("open type", result)
    }
}
