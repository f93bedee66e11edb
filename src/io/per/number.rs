//! Whole numbers, ITU-T X.691 | ISO/IEC 8825-2:2015 chapters 11.3 to 11.8 and 13.
//!
//! Which of the four encodings applies is selected by the bounds passed with each call:
//!
//! | lower bound | upper bound | encoding                     |
//! |-------------|-------------|------------------------------|
//! | `Some`      | `Some`      | constrained whole number     |
//! | `Some`      | `None`      | semi-constrained whole number|
//! | `None`      | any         | unconstrained whole number   |
//!
//! An extensible constraint adds a leading bit that is set when the value lies outside of the
//! root range, in which case the value is encoded as unconstrained whole number.

use crate::io::per::bits::{bytes_for_bits, BYTE_LEN};
use crate::io::per::err::{Error, Limit};
use crate::io::per::{bit_width, PerReader, PerWriter};
use byteorder::{ByteOrder, NetworkEndian};

const I128_OCTETS: usize = std::mem::size_of::<i128>();

/// Octets of the shortest two's-complement representation, never less than one.
fn twos_complement_octets(value: i128) -> usize {
    let magnitude = if value >= 0 { value } else { !value };
    let bits = bit_width(magnitude as u128) + 1;
    bytes_for_bits(bits).max(1)
}

/// `value - lower_bound` for `lower_bound <= value`, which always fits into a `u128`.
#[inline]
const fn offset_from(lower_bound: i128, value: i128) -> u128 {
    value.wrapping_sub(lower_bound) as u128
}

/// Octets of the shortest non-negative binary representation, never less than one.
fn non_negative_octets(value: u128) -> usize {
    bytes_for_bits(bit_width(value)).max(1)
}

impl PerWriter {
    /// ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.3, `value` in exactly `bits` bits
    fn write_non_negative_binary_integer(&mut self, value: u128, bits: usize) -> Result<(), Error> {
        if bits > 64 {
            self.bits.pack((value >> 64) as u64, bits - 64)?;
            self.bits.pack(value as u64, 64)
        } else {
            self.bits.pack(value as u64, bits)
        }
    }

    fn write_octets_u128(&mut self, value: u128, octets: usize) -> Result<(), Error> {
        let mut buffer = [0_u8; I128_OCTETS];
        NetworkEndian::write_u128(&mut buffer, value);
        self.bits.pack_bytes(&buffer[I128_OCTETS - octets..])
    }

    pub(crate) fn constrained_whole_number(
        &mut self,
        lower_bound: i128,
        upper_bound: i128,
        value: i128,
    ) -> Result<(), Error> {
        if value < lower_bound || value > upper_bound {
            return Err(Error::value_not_in_range(value, lower_bound, upper_bound));
        }
        let max_offset = offset_from(lower_bound, upper_bound);
        if max_offset == 0 {
            // 11.5.4: a single possible value is not encoded at all
            return Ok(());
        }
        let offset = offset_from(lower_bound, value);
        let bits = bit_width(max_offset);

        if !self.is_aligned() || max_offset < 255 {
            // 11.5.6, 11.5.7.1: bit-field of minimum size
            self.write_non_negative_binary_integer(offset, bits)
        } else if max_offset < 64 * 1024 {
            // 11.5.7.2 (one octet), 11.5.7.3 (two octets)
            self.bits.align_bytes_zero();
            self.write_non_negative_binary_integer(offset, bytes_for_bits(bits) * BYTE_LEN)
        } else {
            // 11.5.7.4: indefinite length case, octet count as constrained number in
            // 1..=max_octets followed by the octet-aligned offset
            let max_octets = bytes_for_bits(bits);
            let octets = non_negative_octets(offset);
            self.write_non_negative_binary_integer(
                (octets - 1) as u128,
                bit_width((max_octets - 1) as u128),
            )?;
            self.bits.align_bytes_zero();
            self.write_octets_u128(offset, octets)
        }
    }

    pub(crate) fn semi_constrained_whole_number(
        &mut self,
        lower_bound: i128,
        value: i128,
    ) -> Result<(), Error> {
        if value < lower_bound {
            return Err(Error::value_not_in_range(value, lower_bound, i128::MAX));
        }
        let offset = offset_from(lower_bound, value);
        let octets = non_negative_octets(offset);
        self.length_determinant(None, None, octets as u64)?;
        self.write_octets_u128(offset, octets)
    }

    pub(crate) fn unconstrained_whole_number(&mut self, value: i128) -> Result<(), Error> {
        let octets = twos_complement_octets(value);
        self.length_determinant(None, None, octets as u64)?;
        let mut buffer = [0_u8; I128_OCTETS];
        NetworkEndian::write_i128(&mut buffer, value);
        self.bits.pack_bytes(&buffer[I128_OCTETS - octets..])
    }

    pub(crate) fn whole_number(
        &mut self,
        lower_bound: Option<i128>,
        upper_bound: Option<i128>,
        extensible: bool,
        value: i128,
    ) -> Result<(), Error> {
        if extensible {
            let out_of_range = lower_bound.map_or(false, |lb| value < lb)
                || upper_bound.map_or(false, |ub| value > ub);
            self.bits.pack_bit(out_of_range)?;
            if out_of_range {
                return self.unconstrained_whole_number(value);
            }
        }

        match (lower_bound, upper_bound) {
            (Some(lb), Some(ub)) => self.constrained_whole_number(lb, ub, value),
            (Some(lb), None) => self.semi_constrained_whole_number(lb, value),
            (None, Some(ub)) if value > ub => {
                Err(Error::value_not_in_range(value, i128::MIN, ub))
            }
            (None, _) => self.unconstrained_whole_number(value),
        }
    }
}

impl<'a> PerReader<'a> {
    fn read_non_negative_binary_integer(&mut self, bits: usize) -> Result<u128, Error> {
        if bits > 64 {
            let high = self.bits.unpack(bits - 64)?;
            let low = self.bits.unpack(64)?;
            Ok((u128::from(high) << 64) | u128::from(low))
        } else {
            Ok(u128::from(self.bits.unpack(bits)?))
        }
    }

    fn read_octets_u128(&mut self, octets: usize) -> Result<u128, Error> {
        let mut buffer = [0_u8; I128_OCTETS];
        self.bits.unpack_bytes(&mut buffer[I128_OCTETS - octets..])?;
        Ok(NetworkEndian::read_u128(&buffer))
    }

    fn read_value_octets(&mut self) -> Result<usize, Error> {
        let octets = self.length_determinant(None, None)?;
        if octets == 0 {
            Err(Error::size_not_in_range(0, 1, I128_OCTETS as u64))
        } else if octets > I128_OCTETS as u64 {
            Err(Error::unsupported(Limit::IntegerOctets(octets)))
        } else {
            Ok(octets as usize)
        }
    }

    pub(crate) fn constrained_whole_number(
        &mut self,
        lower_bound: i128,
        upper_bound: i128,
    ) -> Result<i128, Error> {
        if upper_bound < lower_bound {
            // no value satisfies the constraint
            return Err(Error::value_not_in_range(lower_bound, lower_bound, upper_bound));
        }
        let max_offset = offset_from(lower_bound, upper_bound);
        if max_offset == 0 {
            return Ok(lower_bound);
        }
        let bits = bit_width(max_offset);

        let offset = if !self.is_aligned() || max_offset < 255 {
            self.read_non_negative_binary_integer(bits)?
        } else if max_offset < 64 * 1024 {
            self.bits.align_bytes()?;
            self.read_non_negative_binary_integer(bytes_for_bits(bits) * BYTE_LEN)?
        } else {
            let max_octets = bytes_for_bits(bits);
            let count_bits = bit_width((max_octets - 1) as u128);
            let octets = self.read_non_negative_binary_integer(count_bits)? as usize + 1;
            if octets > max_octets {
                return Err(Error::size_not_in_range(
                    octets as u64,
                    1,
                    max_octets as u64,
                ));
            }
            self.bits.align_bytes()?;
            self.read_octets_u128(octets)?
        };

        // the bit-field may hold offsets beyond the upper bound
        if offset > max_offset {
            return Err(Error::value_not_in_range(
                lower_bound.saturating_add(offset.min(i128::MAX as u128) as i128),
                lower_bound,
                upper_bound,
            ));
        }
        Ok(lower_bound.wrapping_add(offset as i128))
    }

    pub(crate) fn semi_constrained_whole_number(
        &mut self,
        lower_bound: i128,
    ) -> Result<i128, Error> {
        let octets = self.read_value_octets()?;
        let offset = self.read_octets_u128(octets)?;
        lower_bound
            .checked_add_unsigned(offset)
            .ok_or_else(|| Error::unsupported(Limit::IntegerOctets(octets as u64)))
    }

    pub(crate) fn unconstrained_whole_number(&mut self) -> Result<i128, Error> {
        let octets = self.read_value_octets()?;
        let mut buffer = [0_u8; I128_OCTETS];
        let start = I128_OCTETS - octets;
        self.bits.unpack_bytes(&mut buffer[start..])?;
        if buffer[start] & 0x80 != 0 {
            // negative, sign extend
            buffer[..start].iter_mut().for_each(|b| *b = 0xFF);
        }
        Ok(NetworkEndian::read_i128(&buffer))
    }

    pub(crate) fn whole_number(
        &mut self,
        lower_bound: Option<i128>,
        upper_bound: Option<i128>,
        extensible: bool,
    ) -> Result<i128, Error> {
        if extensible && self.bits.unpack_bit()? {
            return self.unconstrained_whole_number();
        }

        let value = match (lower_bound, upper_bound) {
            (Some(lb), Some(ub)) => self.constrained_whole_number(lb, ub)?,
            (Some(lb), None) => self.semi_constrained_whole_number(lb)?,
            (None, _) => self.unconstrained_whole_number()?,
        };

        let min = lower_bound.unwrap_or(i128::MIN);
        let max = upper_bound.unwrap_or(i128::MAX);
        if value < min || value > max {
            Err(Error::value_not_in_range(value, min, max))
        } else {
            Ok(value)
        }
    }
}
