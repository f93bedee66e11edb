//! ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 15, REAL.
//!
//! Only the binary form of X.690 8.5.7 for IEEE-754 binary32 values: a length prefixed
//! information octet, a one octet exponent and a mantissa of at most three octets. Values the
//! form cannot carry within these limits are reported as [`Limit`] violations.

use crate::io::per::err::{Error, ErrorKind, Limit};
use crate::io::per::{PerReader, PerWriter, BYTE_LEN};

const INFO_BINARY: u8 = 0x80;
const INFO_NEGATIVE: u8 = 0x40;
const INFO_SPECIAL: u8 = 0x40;

const PLUS_INFINITY: u8 = 0x40;
const MINUS_INFINITY: u8 = 0x41;
const NOT_A_NUMBER: u8 = 0x42;
const MINUS_ZERO: u8 = 0x43;

const MANTISSA_BITS: u32 = 23;
const EXPONENT_BIAS: i32 = 127;
const MAX_MANTISSA_OCTETS: usize = 3;

/// The content octets for `value`, without the length prefix. `+0.0` has no content at all.
fn real_content(value: f32) -> Result<Vec<u8>, Error> {
    if value.is_nan() {
        return Ok(vec![NOT_A_NUMBER]);
    }
    if value.is_infinite() {
        let info = if value.is_sign_negative() {
            MINUS_INFINITY
        } else {
            PLUS_INFINITY
        };
        return Ok(vec![info]);
    }
    if value == 0.0 {
        return Ok(if value.is_sign_negative() {
            vec![MINUS_ZERO]
        } else {
            Vec::new()
        });
    }

    let bits = value.to_bits();
    let biased = ((bits >> MANTISSA_BITS) & 0xFF) as i32;
    let fraction = bits & ((1 << MANTISSA_BITS) - 1);
    let (mut mantissa, mut exponent) = if biased == 0 {
        // subnormal
        (fraction, 1 - EXPONENT_BIAS - MANTISSA_BITS as i32)
    } else {
        (
            fraction | (1 << MANTISSA_BITS),
            biased - EXPONENT_BIAS - MANTISSA_BITS as i32,
        )
    };
    let trailing = mantissa.trailing_zeros();
    mantissa >>= trailing;
    exponent += trailing as i32;

    let exponent = i8::try_from(exponent)
        .map_err(|_| Error::unsupported(Limit::RealExponentOctets(2)))?;

    let mut info = INFO_BINARY;
    if value.is_sign_negative() {
        info |= INFO_NEGATIVE;
    }
    let mantissa_octets = mantissa.to_be_bytes();
    let skip = mantissa_octets.iter().take_while(|o| **o == 0).count();

    let mut content = Vec::with_capacity(2 + MAX_MANTISSA_OCTETS);
    content.push(info);
    content.push(exponent as u8);
    content.extend_from_slice(&mantissa_octets[skip..]);
    Ok(content)
}

fn real_from_content(content: &[u8]) -> Result<f32, Error> {
    let info = match content.first() {
        None => return Ok(0.0),
        Some(info) => *info,
    };

    if info & INFO_BINARY == 0 {
        return if info & INFO_SPECIAL != 0 {
            if content.len() != 1 {
                return Err(ErrorKind::InvalidRealEncoding(info).into());
            }
            match info {
                PLUS_INFINITY => Ok(f32::INFINITY),
                MINUS_INFINITY => Ok(f32::NEG_INFINITY),
                NOT_A_NUMBER => Ok(f32::NAN),
                MINUS_ZERO => Ok(-0.0),
                _ => Err(ErrorKind::InvalidRealEncoding(info).into()),
            }
        } else {
            // X.690 8.5.8, decimal
            Err(Error::unsupported(Limit::RealEncoding(info)))
        };
    }

    let negative = info & INFO_NEGATIVE != 0;
    let base_shift = match (info >> 4) & 0b11 {
        0 => 1,
        1 => 3,
        2 => 4,
        _ => return Err(ErrorKind::InvalidRealEncoding(info).into()),
    };
    let scale = i32::from((info >> 2) & 0b11);
    let exponent_octets = match info & 0b11 {
        // X.690 8.5.7.4 d), the next octet holds the exponent length
        0b11 => usize::from(content.get(1).copied().unwrap_or(0)).max(4),
        n => usize::from(n) + 1,
    };
    if exponent_octets != 1 {
        return Err(Error::unsupported(Limit::RealExponentOctets(exponent_octets)));
    }
    let exponent = i32::from(*content.get(1).ok_or(ErrorKind::InvalidRealEncoding(info))? as i8);

    let mantissa_octets = &content[2..];
    if mantissa_octets.is_empty() {
        return Err(ErrorKind::InvalidRealEncoding(info).into());
    }
    if mantissa_octets.len() > MAX_MANTISSA_OCTETS {
        return Err(Error::unsupported(Limit::RealMantissaOctets(
            mantissa_octets.len(),
        )));
    }
    let mantissa = mantissa_octets
        .iter()
        .fold(0_u32, |acc, octet| (acc << 8) | u32::from(*octet));

    // exact in binary64, both the 24 bit mantissa and the power of two
    let magnitude = f64::from(mantissa) * 2_f64.powi(exponent * base_shift + scale);
    let value = magnitude as f32;
    if value.is_infinite() || (value == 0.0 && mantissa != 0) {
        return Err(Error::unsupported(Limit::RealMagnitude));
    }
    Ok(if negative { -value } else { value })
}

impl PerWriter {
    pub(crate) fn real(&mut self, value: f32) -> Result<(), Error> {
        let content = real_content(value)?;
        self.length_determinant(None, None, content.len() as u64)?;
        self.bits.pack_bytes(&content)
    }
}

impl<'a> PerReader<'a> {
    pub(crate) fn real(&mut self) -> Result<f32, Error> {
        let len = self.length_determinant(None, None)? as usize;
        let needed = len * BYTE_LEN;
        if self.bits.remaining() < needed {
            return Err(Error::end_of_stream(needed, self.bits.remaining()));
        }
        let mut content = vec![0_u8; len];
        self.bits.unpack_bytes(&mut content[..])?;
        real_from_content(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::per::{PackedRead, PackedWrite, Variant};

    fn encode(value: f32) -> Vec<u8> {
        let mut writer = PerWriter::unaligned();
        writer.write_real(value).unwrap();
        writer.into_bytes_vec()
    }

    fn decode(bytes: &[u8]) -> Result<f32, Error> {
        PerReader::unaligned(bytes).read_real()
    }

    #[test]
    fn test_special_values() {
        assert_eq!(vec![0x00], encode(0.0));
        assert_eq!(vec![0x01, 0x40], encode(f32::INFINITY));
        assert_eq!(vec![0x01, 0x41], encode(f32::NEG_INFINITY));
        assert_eq!(vec![0x01, 0x42], encode(f32::NAN));
        assert_eq!(vec![0x01, 0x43], encode(-0.0));

        assert_eq!(0.0_f32.to_bits(), decode(&[0x00]).unwrap().to_bits());
        assert_eq!(f32::INFINITY, decode(&[0x01, 0x40]).unwrap());
        assert_eq!(f32::NEG_INFINITY, decode(&[0x01, 0x41]).unwrap());
        assert!(decode(&[0x01, 0x42]).unwrap().is_nan());
        assert_eq!((-0.0_f32).to_bits(), decode(&[0x01, 0x43]).unwrap().to_bits());
    }

    #[test]
    fn test_trailing_zero_bits_are_stripped() {
        // 0.15625 = 5 * 2^-5
        assert_eq!(vec![0x03, 0x80, 0xFB, 0x05], encode(0.15625));
        assert_eq!(vec![0x03, 0x80, 0x00, 0x01], encode(1.0));
        assert_eq!(vec![0x03, 0xC0, 0x01, 0x03], encode(-6.0));
    }

    #[test]
    fn test_bit_identical_round_trip() {
        for value in [
            0.15625_f32,
            1.0,
            -1.5,
            3.4028235e38,
            1.1754944e-38,
            core::f32::consts::PI,
            -123_456.79,
        ] {
            for variant in [Variant::Aligned, Variant::Unaligned] {
                let mut writer = PerWriter::new(variant);
                writer.write_real(value).unwrap();
                let bytes = writer.into_bytes_vec();
                let decoded = PerReader::new(variant, &bytes).read_real().unwrap();
                assert_eq!(value.to_bits(), decoded.to_bits());
            }
        }
    }

    #[test]
    fn test_exponent_beyond_one_octet() {
        let err = PerWriter::unaligned().write_real(1.0e-45).unwrap_err();
        assert_eq!(
            &ErrorKind::Unsupported(Limit::RealExponentOctets(2)),
            err.kind()
        );
        let err = decode(&[0x04, 0x81, 0xFF, 0x00, 0x01]).unwrap_err();
        assert_eq!(
            &ErrorKind::Unsupported(Limit::RealExponentOctets(2)),
            err.kind()
        );
    }

    #[test]
    fn test_mantissa_beyond_three_octets() {
        let err = decode(&[0x06, 0x80, 0x00, 0x01, 0x02, 0x03, 0x04]).unwrap_err();
        assert_eq!(
            &ErrorKind::Unsupported(Limit::RealMantissaOctets(4)),
            err.kind()
        );
    }

    #[test]
    fn test_decimal_is_unsupported() {
        let err = decode(&[0x02, 0x01, 0x31]).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_base_16_with_scale_factor() {
        // 3 * 2^1 * 16^1 = 96
        assert_eq!(96.0, decode(&[0x03, 0xA4, 0x01, 0x03]).unwrap());
        // 1 * 8^-1 = 0.125
        assert_eq!(0.125, decode(&[0x03, 0x90, 0xFF, 0x01]).unwrap());
    }

    #[test]
    fn test_truncated_content() {
        assert!(decode(&[0x03, 0x80, 0xFB]).is_err());
        assert!(decode(&[0x01, 0x80]).is_err());
    }
}
