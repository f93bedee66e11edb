//! Length determinants, ITU-T X.691 | ISO/IEC 8825-2:2015 chapter 11.9.
//!
//! Lengths with an upper bound below 64K are constrained whole numbers. All other lengths use
//! the general form, one octet for up to 127 and two octets (`10` prefix) for up to 16383. Larger
//! lengths need fragmentation which this codec does not implement, they are reported as
//! [`Limit::FragmentedLength`].

use crate::io::per::err::{Error, Limit};
use crate::io::per::{PerReader, PerWriter, LENGTH_BOUND_LIMIT, LENGTH_DET_L1, LENGTH_DET_L2};

impl PerWriter {
    fn unconstrained_length(&mut self, length: u64) -> Result<(), Error> {
        if length > LENGTH_DET_L2 {
            return Err(Error::unsupported(Limit::FragmentedLength(length)));
        }
        // 11.9.3.5: octet-aligned in the ALIGNED variant
        self.align();
        if length <= LENGTH_DET_L1 {
            // 11.9.3.6
            self.bits.pack(length, 8)
        } else {
            // 11.9.3.7
            self.bits.pack(0b10 << 14 | length, 16)
        }
    }

    pub(crate) fn length_determinant(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        length: u64,
    ) -> Result<(), Error> {
        let min = lower_bound.unwrap_or(0);
        let max = upper_bound.unwrap_or(u64::MAX);
        if length < min || length > max {
            return Err(Error::size_not_in_range(length, min, max));
        }
        match upper_bound {
            Some(ub) if ub < LENGTH_BOUND_LIMIT => {
                // 11.9.4.1 -> 11.9.3.3
                self.constrained_length(min, ub, length)
            }
            _ => self.unconstrained_length(length),
        }
    }

    #[inline]
    fn constrained_length(
        &mut self,
        lower_bound: u64,
        upper_bound: u64,
        value: u64,
    ) -> Result<(), Error> {
        self.constrained_whole_number(
            i128::from(lower_bound),
            i128::from(upper_bound),
            i128::from(value),
        )
    }

    /// Size prefix of strings and lists: the extension bit if `extensible`, then nothing for
    /// fixed sizes below 64K or a length determinant otherwise. Sizes outside of the root range
    /// are only encodable if `extensible`. Returns whether the size is fixed.
    pub(crate) fn size(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
        size: u64,
    ) -> Result<bool, Error> {
        let min = lower_bound.unwrap_or(0);
        let max = upper_bound.unwrap_or(u64::MAX);
        let out_of_range = size < min || size > max;

        if extensible {
            self.bits.pack_bit(out_of_range)?;
        }

        if out_of_range {
            if !extensible {
                return Err(Error::size_not_in_range(size, min, max));
            }
            self.length_determinant(None, None, size)?;
            Ok(false)
        } else if lower_bound.is_some() && lower_bound == upper_bound && max < LENGTH_BOUND_LIMIT {
            Ok(true)
        } else {
            self.length_determinant(lower_bound, upper_bound, size)?;
            Ok(false)
        }
    }
}

impl<'a> PerReader<'a> {
    fn unconstrained_length(&mut self) -> Result<u64, Error> {
        self.align()?;
        if !self.bits.unpack_bit()? {
            // 11.9.3.6: less than or equal to 127
            self.bits.unpack(7)
        } else if !self.bits.unpack_bit()? {
            // 11.9.3.7: greater than 127 and less than or equal to 16K - 1
            self.bits.unpack(14)
        } else {
            // 11.9.3.8: chunks of 16K multiples
            let multiple = self.bits.unpack(6)?;
            Err(Error::unsupported(Limit::FragmentedLength(
                multiple * (LENGTH_DET_L2 + 1),
            )))
        }
    }

    pub(crate) fn length_determinant(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
    ) -> Result<u64, Error> {
        let min = lower_bound.unwrap_or(0);
        match upper_bound {
            Some(ub) if ub < LENGTH_BOUND_LIMIT => {
                let length = self.constrained_whole_number(i128::from(min), i128::from(ub))?;
                Ok(length as u64)
            }
            _ => {
                let length = self.unconstrained_length()?;
                let max = upper_bound.unwrap_or(u64::MAX);
                if length < min || length > max {
                    Err(Error::size_not_in_range(length, min, max))
                } else {
                    Ok(length)
                }
            }
        }
    }

    /// Counterpart of the writer's size prefix, returns the size and whether it was fixed.
    pub(crate) fn size(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
    ) -> Result<(u64, bool), Error> {
        if extensible && self.bits.unpack_bit()? {
            Ok((self.length_determinant(None, None)?, false))
        } else if lower_bound.is_some()
            && lower_bound == upper_bound
            && upper_bound.unwrap_or(u64::MAX) < LENGTH_BOUND_LIMIT
        {
            Ok((lower_bound.unwrap_or(0), true))
        } else {
            Ok((self.length_determinant(lower_bound, upper_bound)?, false))
        }
    }
}
