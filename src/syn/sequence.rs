//! ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 19, the bits in front of the root components of
//! a SEQUENCE.

use crate::io::per::{Error, PerReader, PerWriter};

/// The extension bit of an extensible sequence and one presence bit per OPTIONAL or DEFAULT
/// component of the extension root.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SequencePreamble {
    extensible: bool,
    extended: bool,
    presence: Vec<bool>,
}

impl SequencePreamble {
    pub fn new(extensible: bool, optional_fields: usize) -> Self {
        Self {
            extensible,
            extended: false,
            presence: vec![false; optional_fields],
        }
    }

    #[inline]
    pub fn is_extensible(&self) -> bool {
        self.extensible
    }

    /// Whether extension additions follow the root components.
    #[inline]
    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Only has an effect on extensible sequences.
    pub fn set_extended(&mut self, extended: bool) {
        self.extended = self.extensible && extended;
    }

    pub fn is_present(&self, optional_field: usize) -> bool {
        self.presence.get(optional_field).copied().unwrap_or(false)
    }

    /// # Panics
    ///
    /// If `optional_field` is not below the optional field count.
    pub fn set_present(&mut self, optional_field: usize, present: bool) {
        self.presence[optional_field] = present;
    }

    #[inline]
    pub fn optional_fields(&self) -> usize {
        self.presence.len()
    }
}

impl PerWriter {
    fn sequence_preamble(&mut self, preamble: &SequencePreamble) -> Result<(), Error> {
        if preamble.extensible {
            self.bits.pack_bit(preamble.extended)?;
        }
        preamble
            .presence
            .iter()
            .try_for_each(|present| self.bits.pack_bit(*present))
    }

    pub fn write_sequence_preamble(&mut self, preamble: &SequencePreamble) -> Result<(), Error> {
        let result = self.sequence_preamble(preamble);
        self.trace("sequence preamble", result)
    }
}

impl<'a> PerReader<'a> {
    fn sequence_preamble(
        &mut self,
        extensible: bool,
        optional_fields: usize,
    ) -> Result<SequencePreamble, Error> {
        let mut preamble = SequencePreamble::new(extensible, optional_fields);
        if extensible {
            preamble.extended = self.bits.unpack_bit()?;
        }
        for present in preamble.presence.iter_mut() {
            *present = self.bits.unpack_bit()?;
        }
        Ok(preamble)
    }

    pub fn read_sequence_preamble(
        &mut self,
        extensible: bool,
        optional_fields: usize,
    ) -> Result<SequencePreamble, Error> {
        let result = self.sequence_preamble(extensible, optional_fields);
        self.trace("sequence preamble", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_bit_comes_first() {
        let mut preamble = SequencePreamble::new(true, 3);
        preamble.set_extended(true);
        preamble.set_present(2, true);

        let mut writer = PerWriter::aligned();
        writer.write_sequence_preamble(&preamble).unwrap();
        assert_eq!(4, writer.bit_len());
        assert_eq!(&[0b1001_0000], writer.byte_content());

        let bytes = writer.into_bytes_vec();
        let decoded = PerReader::aligned(&bytes)
            .read_sequence_preamble(true, 3)
            .unwrap();
        assert_eq!(preamble, decoded);
        assert!(!decoded.is_present(0));
        assert!(decoded.is_present(2));
        assert!(!decoded.is_present(3));
    }

    #[test]
    fn test_not_extensible() {
        let mut preamble = SequencePreamble::new(false, 0);
        preamble.set_extended(true);
        assert!(!preamble.is_extended());

        let mut writer = PerWriter::unaligned();
        writer.write_sequence_preamble(&preamble).unwrap();
        assert_eq!(0, writer.bit_len());
    }
}
