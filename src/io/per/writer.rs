use crate::io::per::bits::BitWriter;
use crate::io::per::diag::{default_sink, DiagnosticSink};
use crate::io::per::err::{Direction, Error};
use crate::io::per::reader::PerReader;
use crate::io::per::{PackedWrite, Variant};
use crate::syn::bitstring::BitString;
use std::sync::Arc;

/// Encoding front end. Owns the output buffer for the duration of one encode call.
pub struct PerWriter {
    pub(crate) bits: BitWriter,
    variant: Variant,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for PerWriter {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl PerWriter {
    pub fn new(variant: Variant) -> Self {
        Self {
            bits: BitWriter::default(),
            variant,
            sink: default_sink(),
        }
    }

    #[inline]
    pub fn aligned() -> Self {
        Self::new(Variant::Aligned)
    }

    #[inline]
    pub fn unaligned() -> Self {
        Self::new(Variant::Unaligned)
    }

    pub fn with_capacity(variant: Variant, capacity_bytes: usize) -> Self {
        Self {
            bits: BitWriter::with_capacity(capacity_bytes),
            ..Self::new(variant)
        }
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
    pub fn bits(&self) -> &BitWriter {
        &self.bits
    }

    #[inline]
    pub fn bits_mut(&mut self) -> &mut BitWriter {
        &mut self.bits
    }

    #[inline]
    pub fn byte_content(&self) -> &[u8] {
        self.bits.content()
    }

    #[inline]
    pub const fn bit_len(&self) -> usize {
        self.bits.bit_len()
    }

    #[inline]
    pub fn into_bytes_vec(self) -> Vec<u8> {
        self.bits.into_bytes()
    }

    pub fn as_reader(&self) -> PerReader<'_> {
        PerReader::from_bits(self.variant, self.bits.content(), self.bits.bit_len())
            .with_sink(Arc::clone(&self.sink))
    }

    /// Reports a failed `operation` to the diagnostic sink and tags the error as an encoding
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
            let e = e.with_direction(Direction::Encode);
            self.sink.failure(Direction::Encode, operation, &e);
            e
        })
    }

    /// Pads to the next octet boundary in the ALIGNED variant, no-op otherwise.
    #[inline]
    pub(crate) fn align(&mut self) {
        if self.is_aligned() {
            self.bits.align_bytes_zero();
        }
    }

    #[inline]
    pub(crate) fn swap_bits(&mut self, bits: BitWriter) -> BitWriter {
        core::mem::replace(&mut self.bits, bits)
    }
}

impl PackedWrite for PerWriter {
    #[inline]
    fn write_boolean(&mut self, value: bool) -> Result<(), Error> {
        let result = self.bits.pack_bit(value);
        self.trace("boolean", result)
    }

    fn write_constrained_whole_number(
        &mut self,
        lower_bound: i128,
        upper_bound: i128,
        value: i128,
    ) -> Result<(), Error> {
        let result = self.constrained_whole_number(lower_bound, upper_bound, value);
        self.trace("constrained whole number", result)
    }

    fn write_semi_constrained_whole_number(
        &mut self,
        lower_bound: i128,
        value: i128,
    ) -> Result<(), Error> {
        let result = self.semi_constrained_whole_number(lower_bound, value);
        self.trace("semi-constrained whole number", result)
    }

    fn write_unconstrained_whole_number(&mut self, value: i128) -> Result<(), Error> {
        let result = self.unconstrained_whole_number(value);
        self.trace("unconstrained whole number", result)
    }

    fn write_whole_number(
        &mut self,
        lower_bound: Option<i128>,
        upper_bound: Option<i128>,
        extensible: bool,
        value: i128,
    ) -> Result<(), Error> {
        let result = self.whole_number(lower_bound, upper_bound, extensible, value);
        self.trace("whole number", result)
    }

    fn write_length_determinant(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        length: u64,
    ) -> Result<(), Error> {
        let result = self.length_determinant(lower_bound, upper_bound, length);
        self.trace("length determinant", result)
    }

    fn write_sequence_of_len(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
        len: u64,
    ) -> Result<(), Error> {
        let result = self.size(lower_bound, upper_bound, extensible, len).map(drop);
        self.trace("sequence of length", result)
    }

    fn write_normally_small_non_negative_whole_number(&mut self, value: u64) -> Result<(), Error> {
        let result = self.normally_small_non_negative_whole_number(value);
        self.trace("normally small non-negative whole number", result)
    }

    fn write_normally_small_length(&mut self, length: u64) -> Result<(), Error> {
        let result = self.normally_small_length(length);
        self.trace("normally small length", result)
    }

    fn write_enumeration_index(
        &mut self,
        std_variants: u64,
        extension_variants: Option<u64>,
        index: u64,
    ) -> Result<(), Error> {
        let result = self.enumeration_index(std_variants, extension_variants, index);
        self.trace("enumeration index", result)
    }

    fn write_choice_index(
        &mut self,
        std_variants: u64,
        extensible: bool,
        index: u64,
    ) -> Result<(), Error> {
        let result = self.choice_index(std_variants, extensible, index);
        self.trace("choice index", result)
    }

    fn write_bitstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
        value: &BitString,
    ) -> Result<(), Error> {
        let result = self.bitstring(lower_bound, upper_bound, extensible, value);
        self.trace("bit string", result)
    }

    fn write_octetstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
        value: &[u8],
    ) -> Result<(), Error> {
        let result = self.octetstring(lower_bound, upper_bound, extensible, value);
        self.trace("octet string", result)
    }

    fn write_real(&mut self, value: f32) -> Result<(), Error> {
        let result = self.real(value);
        self.trace("real", result)
    }

    fn write_open_type_bytes(&mut self, encoded: &[u8]) -> Result<(), Error> {
        let result = self.open_type_bytes(encoded);
        self.trace("open type", result)
    }
}
