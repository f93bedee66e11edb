//! ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 16, BIT STRING.
//!
//! Content goes onto the wire highest bit index first: the partial top octet of the value
//! storage, then every full octet down to index `0`.

use crate::io::per::bits::bytes_for_bits;
use crate::io::per::err::Error;
use crate::io::per::{PerReader, PerWriter, BYTE_LEN};
use crate::syn::bitstring::BitString;

/// Fixed sizes up to this many bits are never octet-aligned, X.691 16.9 and 16.10
const SMALL_FIXED_BITS: u64 = 16;

impl PerWriter {
    fn bitstring_content(&mut self, value: &BitString) -> Result<(), Error> {
        let octets = value.as_octets();
        let full = value.len() / BYTE_LEN;
        let rest = value.len() % BYTE_LEN;
        if rest > 0 {
            self.bits.pack(u64::from(octets[full]), rest)?;
        }
        for octet in octets[..full].iter().rev() {
            self.bits.pack(u64::from(*octet), BYTE_LEN)?;
        }
        Ok(())
    }

    pub(crate) fn bitstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
        value: &BitString,
    ) -> Result<(), Error> {
        let len = value.len() as u64;
        let fixed = self.size(lower_bound, upper_bound, extensible, len)?;
        if len > 0 && !(fixed && len <= SMALL_FIXED_BITS) {
            self.align();
        }
        self.bitstring_content(value)
    }
}

impl<'a> PerReader<'a> {
    fn bitstring_content(&mut self, len: usize) -> Result<BitString, Error> {
        if self.bits.remaining() < len {
            return Err(Error::end_of_stream(len, self.bits.remaining()));
        }
        let mut octets = vec![0_u8; bytes_for_bits(len)];
        let full = len / BYTE_LEN;
        let rest = len % BYTE_LEN;
        if rest > 0 {
            octets[full] = self.bits.unpack(rest)? as u8;
        }
        for octet in octets[..full].iter_mut().rev() {
            *octet = self.bits.unpack(BYTE_LEN)? as u8;
        }
        Ok(BitString::from_octets(octets, len))
    }

    pub(crate) fn bitstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
    ) -> Result<BitString, Error> {
        let (len, fixed) = self.size(lower_bound, upper_bound, extensible)?;
        if len > 0 && !(fixed && len <= SMALL_FIXED_BITS) {
            self.align()?;
        }
        self.bitstring_content(len as usize)
    }
}
