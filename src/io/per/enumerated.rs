//! Enumeration and choice indices together with the normally small numbers they fall back to
//! for extension values.

use crate::io::per::err::{Error, Limit};
use crate::io::per::{PerReader, PerWriter, NORMALLY_SMALL_LIMIT};

impl PerWriter {
    pub(crate) fn normally_small_non_negative_whole_number(
        &mut self,
        value: u64,
    ) -> Result<(), Error> {
        if value > NORMALLY_SMALL_LIMIT {
            // 11.6.2 would need a semi-constrained number
            return Err(Error::unsupported(Limit::NormallySmallNumber(value)));
        }
        // 11.6.1: single zero bit followed by a 6 bit field
        self.bits.pack(value, 7)
    }

    pub(crate) fn normally_small_length(&mut self, length: u64) -> Result<(), Error> {
        if length == 0 {
            Err(Error::size_not_in_range(0, 1, NORMALLY_SMALL_LIMIT + 1))
        } else {
            self.normally_small_non_negative_whole_number(length - 1)
        }
    }

    /// Root values as constrained index, extension values with a set extension bit followed by
    /// the normally small offset into the extension values.
    fn index(&mut self, std_variants: u64, extensible: bool, index: u64) -> Result<(), Error> {
        if extensible {
            let is_extension = index >= std_variants;
            self.bits.pack_bit(is_extension)?;
            if is_extension {
                return self.normally_small_non_negative_whole_number(index - std_variants);
            }
        }
        self.constrained_whole_number(0, i128::from(std_variants) - 1, i128::from(index))
    }

    pub(crate) fn enumeration_index(
        &mut self,
        std_variants: u64,
        extension_variants: Option<u64>,
        index: u64,
    ) -> Result<(), Error> {
        let variant_count = std_variants.saturating_add(extension_variants.unwrap_or(0));
        if index >= variant_count {
            Err(Error::invalid_enumeration_index(index, variant_count))
        } else {
            self.index(std_variants, extension_variants.is_some(), index)
        }
    }

    pub(crate) fn choice_index(
        &mut self,
        std_variants: u64,
        extensible: bool,
        index: u64,
    ) -> Result<(), Error> {
        if !extensible && index >= std_variants {
            Err(Error::invalid_choice_index(index, std_variants))
        } else {
            self.index(std_variants, extensible, index)
        }
    }
}

impl<'a> PerReader<'a> {
    pub(crate) fn normally_small_non_negative_whole_number(&mut self) -> Result<u64, Error> {
        if self.bits.unpack_bit()? {
            // the value is at least 64, its semi-constrained encoding is left unread
            Err(Error::unsupported(Limit::NormallySmallNumber(
                NORMALLY_SMALL_LIMIT + 1,
            )))
        } else {
            self.bits.unpack(6)
        }
    }

    #[inline]
    pub(crate) fn normally_small_length(&mut self) -> Result<u64, Error> {
        self.normally_small_non_negative_whole_number().map(|n| n + 1)
    }

    fn index(
        &mut self,
        std_variants: u64,
        extensible: bool,
        invalid: impl FnOnce() -> Error,
    ) -> Result<u64, Error> {
        if extensible && self.bits.unpack_bit()? {
            let offset = self.normally_small_non_negative_whole_number()?;
            Ok(std_variants.saturating_add(offset))
        } else if std_variants == 0 {
            // without root values there is no index to decode
            Err(invalid())
        } else {
            let index = self.constrained_whole_number(0, i128::from(std_variants) - 1)?;
            Ok(index as u64)
        }
    }

    pub(crate) fn enumeration_index(
        &mut self,
        std_variants: u64,
        extension_variants: Option<u64>,
    ) -> Result<u64, Error> {
        let variant_count = std_variants.saturating_add(extension_variants.unwrap_or(0));
        let invalid = || Error::invalid_enumeration_index(0, variant_count);
        let index = self.index(std_variants, extension_variants.is_some(), invalid)?;
        if index < variant_count {
            Ok(index)
        } else {
            Err(Error::invalid_enumeration_index(index, variant_count))
        }
    }

    #[inline]
    pub(crate) fn choice_index(
        &mut self,
        std_variants: u64,
        extensible: bool,
    ) -> Result<u64, Error> {
        self.index(std_variants, extensible, || {
            Error::invalid_choice_index(0, std_variants)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::per::{ErrorKind, PackedRead, PackedWrite, Variant};

    #[test]
    fn test_non_extensible_width() {
        let mut writer = PerWriter::unaligned();
        writer.write_enumeration_index(5, None, 4).unwrap();
        assert_eq!(3, writer.bit_len());
        assert_eq!(&[0b1000_0000], writer.byte_content());

        let mut writer = PerWriter::unaligned();
        writer.write_enumeration_index(1, None, 0).unwrap();
        assert_eq!(0, writer.bit_len());
    }

    #[test]
    fn test_extensible_root_and_extension() {
        let mut writer = PerWriter::unaligned();
        writer.write_enumeration_index(3, Some(2), 1).unwrap();
        writer.write_enumeration_index(3, Some(2), 4).unwrap();
        // 0 01 | 1 0 000001
        assert_eq!(11, writer.bit_len());
        assert_eq!(&[0b0011_0000, 0b0010_0000], writer.byte_content());

        let bytes = writer.into_bytes_vec();
        let mut reader = PerReader::unaligned(&bytes);
        assert_eq!(1, reader.read_enumeration_index(3, Some(2)).unwrap());
        assert_eq!(4, reader.read_enumeration_index(3, Some(2)).unwrap());
    }

    #[test]
    fn test_unknown_extension_value_is_rejected() {
        let mut writer = PerWriter::unaligned();
        writer.write_enumeration_index(3, Some(5), 7).unwrap();
        let bytes = writer.into_bytes_vec();
        let mut reader = PerReader::unaligned(&bytes);
        let err = reader.read_enumeration_index(3, Some(2)).unwrap_err();
        assert_eq!(
            &ErrorKind::InvalidEnumerationIndex {
                index: 7,
                variant_count: 5
            },
            err.kind()
        );
    }

    #[test]
    fn test_out_of_range_index_fails_to_encode() {
        let mut writer = PerWriter::unaligned();
        assert!(writer.write_enumeration_index(4, None, 4).is_err());
        assert!(writer.write_enumeration_index(4, Some(0), 4).is_err());
    }

    #[test]
    fn test_decode_rejects_ordinal_beyond_root() {
        // 3 root values use 2 bits, 0b11 is not a legal ordinal
        let mut reader = PerReader::unaligned(&[0b1100_0000]);
        assert!(reader.read_enumeration_index(3, None).is_err());
    }

    #[test]
    fn test_zero_root_values_decode_extensions_only() {
        let mut reader = PerReader::unaligned(&[0x00]);
        let err = reader.read_enumeration_index(0, Some(3)).unwrap_err();
        assert_eq!(
            &ErrorKind::InvalidEnumerationIndex {
                index: 0,
                variant_count: 3
            },
            err.kind()
        );

        // 1 | 0 000001
        let mut reader = PerReader::unaligned(&[0b1000_0001]);
        assert_eq!(1, reader.read_enumeration_index(0, Some(3)).unwrap());
    }

    #[test]
    fn test_zero_root_alternatives_are_rejected() {
        let cases: [(&[u8], bool); 2] = [(&[], false), (&[0x00], true)];
        for (data, extensible) in cases {
            let mut reader = PerReader::unaligned(data);
            let err = reader.read_choice_index(0, extensible).unwrap_err();
            assert_eq!(
                &ErrorKind::InvalidChoiceIndex {
                    index: 0,
                    variant_count: 0
                },
                err.kind()
            );
        }
    }

    #[test]
    fn test_normally_small_limit() {
        let mut writer = PerWriter::unaligned();
        writer
            .write_normally_small_non_negative_whole_number(63)
            .unwrap();
        assert_eq!(&[0b0111_1110], writer.byte_content());
        let err = writer
            .write_normally_small_non_negative_whole_number(64)
            .unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_normally_small_length() {
        let mut writer = PerWriter::new(Variant::Aligned);
        writer.write_normally_small_length(1).unwrap();
        writer.write_normally_small_length(64).unwrap();
        assert!(writer.write_normally_small_length(0).is_err());
        let bytes = writer.into_bytes_vec();
        let mut reader = PerReader::aligned(&bytes);
        assert_eq!(1, reader.read_normally_small_length().unwrap());
        assert_eq!(64, reader.read_normally_small_length().unwrap());
    }

    #[test]
    fn test_choice_index_extension() {
        let mut writer = PerWriter::unaligned();
        writer.write_choice_index(2, true, 3).unwrap();
        let bytes = writer.into_bytes_vec();
        let mut reader = PerReader::unaligned(&bytes);
        assert_eq!(3, reader.read_choice_index(2, true).unwrap());
        assert!(PerWriter::unaligned().write_choice_index(2, false, 2).is_err());
    }
}
