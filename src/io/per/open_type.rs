//! ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 11.2, open type fields.
//!
//! The content of an open type is a complete encoding of its own, padded to whole octets and
//! prefixed with its octet count. Decoders that do not understand the content can skip it.

use crate::io::per::bits::BitWriter;
use crate::io::per::err::{Error, ErrorKind};
use crate::io::per::{PerReader, PerWriter, BYTE_LEN};

impl PerWriter {
    fn open_type<T, F>(&mut self, content: F) -> Result<T, Error>
    where
        F: FnOnce(&mut PerWriter) -> Result<T, Error>,
    {
        let scratch = self.swap_bits(BitWriter::default());
        let result = content(self);
        let inner = self.swap_bits(scratch);
        let value = result?;

        let mut octets = inner.into_bytes();
        if octets.is_empty() {
            // X.691 11.1: a complete encoding is at least one octet
            octets.push(0x00);
        }
        self.length_determinant(None, None, octets.len() as u64)?;
        self.bits.pack_bytes(&octets)?;
        Ok(value)
    }

    /// Encodes whatever `content` writes as an open type. The writer is redirected into a
    /// scratch buffer while `content` runs and restored afterwards, also if `content` fails.
    pub fn write_open_type<T, F>(&mut self, content: F) -> Result<T, Error>
    where
        F: FnOnce(&mut PerWriter) -> Result<T, Error>,
    {
        let result = self.open_type(content);
        self.trace("open type", result)
    }

    pub(crate) fn open_type_bytes(&mut self, encoded: &[u8]) -> Result<(), Error> {
        self.open_type(|writer| writer.bits.pack_bytes(encoded))
    }
}

impl<'a> PerReader<'a> {
    fn open_type<T, F>(&mut self, content: F) -> Result<T, Error>
    where
        F: FnOnce(&mut PerReader<'a>) -> Result<T, Error>,
    {
        let len = self.length_determinant(None, None)? as usize;
        let start = self.bits.subview(0, len)?;
        let parent = self.swap_bits(start);
        let result = content(self);
        let frame = self.swap_bits(parent);
        self.bits.advance_bytes(len)?;

        result.map_err(|e| match e.kind() {
            ErrorKind::EndOfStream { needed, .. } => ErrorKind::OpenTypeOverrun {
                consumed: frame.distance_from(&start) + needed,
                available: len * BYTE_LEN,
            }
            .into(),
            _ => e,
        })
    }

    /// Decodes an open type with `content`, which sees a reader bounded to the frame. Afterwards
    /// this reader continues right behind the frame, no matter how much of it `content` read.
    pub fn read_open_type<T, F>(&mut self, content: F) -> Result<T, Error>
    where
        F: FnOnce(&mut PerReader<'a>) -> Result<T, Error>,
    {
        let result = self.open_type(content);
        self.trace("open type", result)
    }

    /// Length in octets of the skipped frame.
    pub(crate) fn skip_open_type_frame(&mut self) -> Result<usize, Error> {
        self.open_type(|reader| Ok(reader.bits.remaining() / BYTE_LEN))
    }

    pub(crate) fn open_type_bytes(&mut self) -> Result<Vec<u8>, Error> {
        self.open_type(|reader| {
            let mut octets = vec![0_u8; reader.bits.remaining() / BYTE_LEN];
            reader.bits.unpack_bytes(&mut octets[..])?;
            Ok(octets)
        })
    }
}
