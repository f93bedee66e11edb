pub use crate::io::per::{
    Category, DiagnosticSink, Direction, Error, ErrorKind, Limit, LogSink, NoopSink, PackedRead,
    PackedWrite, PerReader, PerWriter, Variant,
};
pub use crate::syn::bitstring::BitString;
pub use crate::syn::choice::Choice;
pub use crate::syn::extension::ExtensionGroups;
pub use crate::syn::numbers::WholeNumber;
pub use crate::syn::octetstring::OctetString;
pub use crate::syn::sequence::SequencePreamble;
pub use crate::syn::{decode, encode, Readable, Writable};
