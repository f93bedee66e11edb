//! ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 17, OCTET STRING.

use crate::io::per::err::Error;
use crate::io::per::{PerReader, PerWriter, BYTE_LEN};

/// Fixed sizes up to this many octets are never octet-aligned, X.691 17.6 and 17.7
const SMALL_FIXED_OCTETS: u64 = 2;

impl PerWriter {
    pub(crate) fn octetstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
        value: &[u8],
    ) -> Result<(), Error> {
        let len = value.len() as u64;
        let fixed = self.size(lower_bound, upper_bound, extensible, len)?;
        if len > 0 && !(fixed && len <= SMALL_FIXED_OCTETS) {
            self.align();
        }
        self.bits.pack_bytes(value)
    }
}

impl<'a> PerReader<'a> {
    pub(crate) fn octetstring(
        &mut self,
        lower_bound: Option<u64>,
        upper_bound: Option<u64>,
        extensible: bool,
    ) -> Result<Vec<u8>, Error> {
        let (len, fixed) = self.size(lower_bound, upper_bound, extensible)?;
        if len > 0 && !(fixed && len <= SMALL_FIXED_OCTETS) {
            self.align()?;
        }
        let len = len as usize;
        let needed = len * BYTE_LEN;
        if self.bits.remaining() < needed {
            return Err(Error::end_of_stream(needed, self.bits.remaining()));
        }
        let mut octets = vec![0_u8; len];
        self.bits.unpack_bytes(&mut octets[..])?;
        Ok(octets)
    }
}
