//! ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 23, CHOICE.
//!
//! A choice is a Rust enum. Only the active alternative can be written or read, so no runtime
//! check of the accessed alternative is needed. Alternatives of the extension are carried in
//! open types, which lets decoders skip the ones they do not know.

use crate::io::per::{Error, PackedRead, PackedWrite, PerReader, PerWriter};

pub trait Choice: Sized {
    const NAME: &'static str;
    /// Alternatives of the extension root.
    const STD_VARIANT_COUNT: u64;
    /// All alternatives known to this schema, root and extension.
    const VARIANT_COUNT: u64 = Self::STD_VARIANT_COUNT;
    const EXTENSIBLE: bool = false;

    /// The index of the active alternative in definition order.
    fn index(&self) -> u64;

    fn variant_name(&self) -> &'static str;

    fn write_content(&self, writer: &mut PerWriter) -> Result<(), Error>;

    /// `None` if `index` does not name an alternative known to this schema.
    fn read_content(index: u64, reader: &mut PerReader<'_>) -> Result<Option<Self>, Error>;
}

impl PerWriter {
    pub fn write_choice<C: Choice>(&mut self, value: &C) -> Result<(), Error> {
        let index = value.index();
        self.write_choice_index(C::STD_VARIANT_COUNT, C::EXTENSIBLE, index)?;
        if index >= C::STD_VARIANT_COUNT {
            self.write_open_type(|writer| value.write_content(writer))
        } else {
            value.write_content(self)
        }
    }
}

impl<'a> PerReader<'a> {
    /// An unknown alternative of the extension fails with
    /// [`InvalidChoiceIndex`](crate::io::per::ErrorKind::InvalidChoiceIndex), its content has
    /// been skipped by then.
    pub fn read_choice<C: Choice>(&mut self) -> Result<C, Error> {
        let index = self.read_choice_index(C::STD_VARIANT_COUNT, C::EXTENSIBLE)?;
        let value = if index >= C::STD_VARIANT_COUNT {
            self.read_open_type(|reader| C::read_content(index, reader))?
        } else {
            C::read_content(index, self)?
        };
        let result = value.ok_or_else(|| Error::invalid_choice_index(index, C::VARIANT_COUNT));
        self.trace("choice", result)
    }
}
