//! The typed layer above the wire primitives. Protocol schemas implement [`Writable`] and
//! [`Readable`] by calling the primitives of [`PerWriter`] and [`PerReader`] field by field.

use crate::io::per::{Error, PackedRead, PackedWrite, PerReader, PerWriter, Variant};

pub mod bitstring;
pub mod choice;
pub mod dump;
pub mod extension;
pub mod numbers;
pub mod octetstring;
pub mod sequence;

pub trait Writable {
    fn write(&self, writer: &mut PerWriter) -> Result<(), Error>;
}

pub trait Readable: Sized {
    fn read(reader: &mut PerReader<'_>) -> Result<Self, Error>;
}

/// ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 12
impl Writable for bool {
    fn write(&self, writer: &mut PerWriter) -> Result<(), Error> {
        writer.write_boolean(*self)
    }
}

impl Readable for bool {
    fn read(reader: &mut PerReader<'_>) -> Result<Self, Error> {
        reader.read_boolean()
    }
}

/// ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 24
impl Writable for () {
    fn write(&self, writer: &mut PerWriter) -> Result<(), Error> {
        writer.write_null()
    }
}

impl Readable for () {
    fn read(reader: &mut PerReader<'_>) -> Result<Self, Error> {
        reader.read_null()
    }
}

/// ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 15
impl Writable for f32 {
    fn write(&self, writer: &mut PerWriter) -> Result<(), Error> {
        writer.write_real(*self)
    }
}

impl Readable for f32 {
    fn read(reader: &mut PerReader<'_>) -> Result<Self, Error> {
        reader.read_real()
    }
}

/// A complete encoding of `value`, padded to whole octets and never empty (X.691 11.1).
pub fn encode<T: Writable + ?Sized>(variant: Variant, value: &T) -> Result<Vec<u8>, Error> {
    let mut writer = PerWriter::new(variant);
    value.write(&mut writer)?;
    let mut bytes = writer.into_bytes_vec();
    if bytes.is_empty() {
        bytes.push(0x00);
    }
    Ok(bytes)
}

/// Decodes one `T` from the front of `bytes`. Trailing octets are not inspected.
pub fn decode<T: Readable>(variant: Variant, bytes: &[u8]) -> Result<T, Error> {
    T::read(&mut PerReader::new(variant, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_encoding_is_one_octet() {
        assert_eq!(vec![0x00], encode(Variant::Aligned, &()).unwrap());
        decode::<()>(Variant::Aligned, &[0x00]).unwrap();
    }

    #[test]
    fn test_builtin_types() {
        assert_eq!(vec![0x80], encode(Variant::Unaligned, &true).unwrap());
        assert!(decode::<bool>(Variant::Unaligned, &[0x80]).unwrap());
        let bytes = encode(Variant::Aligned, &0.15625_f32).unwrap();
        assert_eq!(vec![0x03, 0x80, 0xFB, 0x05], bytes);
        assert_eq!(0.15625, decode::<f32>(Variant::Aligned, &bytes).unwrap());
    }

    #[test]
    fn test_decode_of_empty_input_fails() {
        assert!(decode::<bool>(Variant::Unaligned, &[]).is_err());
    }
}
