use backtrace::Backtrace;
use std::fmt::{Debug, Display, Formatter};

pub struct Error(pub(crate) Box<Inner>);

impl Error {
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.0.kind
    }

    /// Whether the failure happened while encoding or decoding. Only `None` for errors that
    /// never left the value layer (e.g. a malformed hex string).
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.0.direction
    }

    pub fn category(&self) -> Category {
        match (&self.0.kind, self.0.direction) {
            (ErrorKind::Unsupported(_), _) => Category::Unsupported,
            (_, Some(Direction::Encode)) => Category::EncodeFailure,
            (_, Some(Direction::Decode)) => Category::DecodeFailure,
            (ErrorKind::InsufficientSpaceInDestinationBuffer, None) => Category::EncodeFailure,
            (_, None) => Category::DecodeFailure,
        }
    }

    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self.0.kind, ErrorKind::Unsupported(_))
    }

    #[inline]
    pub(crate) fn with_direction(mut self, direction: Direction) -> Self {
        if self.0.direction.is_none() {
            self.0.direction = Some(direction);
        }
        self
    }

    #[cold]
    #[inline(never)]
    pub fn value_not_in_range(value: i128, min: i128, max: i128) -> Self {
        Self::from(ErrorKind::ValueNotInRange { value, min, max })
    }

    #[cold]
    #[inline(never)]
    pub fn size_not_in_range(size: u64, min: u64, max: u64) -> Self {
        Self::from(ErrorKind::SizeNotInRange { size, min, max })
    }

    #[cold]
    #[inline(never)]
    pub fn end_of_stream(needed: usize, remaining: usize) -> Self {
        Self::from(ErrorKind::EndOfStream { needed, remaining })
    }

    #[cold]
    #[inline(never)]
    pub fn insufficient_space_in_destination_buffer() -> Self {
        Self::from(ErrorKind::InsufficientSpaceInDestinationBuffer)
    }

    #[cold]
    #[inline(never)]
    pub fn invalid_enumeration_index(index: u64, variant_count: u64) -> Self {
        Self::from(ErrorKind::InvalidEnumerationIndex {
            index,
            variant_count,
        })
    }

    #[cold]
    #[inline(never)]
    pub fn invalid_choice_index(index: u64, variant_count: u64) -> Self {
        Self::from(ErrorKind::InvalidChoiceIndex {
            index,
            variant_count,
        })
    }

    #[cold]
    #[inline(never)]
    pub fn unsupported(limit: Limit) -> Self {
        Self::from(ErrorKind::Unsupported(limit))
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Error(Box::new(Inner::from(kind)))
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{self}")?;
        let mut backtrace = self.0.backtrace.clone();
        backtrace.resolve();
        writeln!(f, "{backtrace:?}")
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0.direction {
            Some(direction) => write!(f, "{direction} failed: {}", self.0.kind),
            None => Display::fmt(&self.0.kind, f),
        }
    }
}

impl std::error::Error for Error {}

impl PartialEq<ErrorKind> for Error {
    fn eq(&self, other: &ErrorKind) -> bool {
        self.0.kind.eq(other)
    }
}

pub(crate) struct Inner {
    pub(crate) kind: ErrorKind,
    pub(crate) direction: Option<Direction>,
    pub(crate) backtrace: Backtrace,
}

impl From<ErrorKind> for Inner {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            direction: None,
            backtrace: Backtrace::new_unresolved(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Direction {
    Encode,
    Decode,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Encode => f.write_str("encoding"),
            Direction::Decode => f.write_str("decoding"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Category {
    EncodeFailure,
    DecodeFailure,
    /// A documented permanent limit of this codec, not malformed input.
    Unsupported,
}

/// The deliberate ceilings of this codec. Hitting one is reported as
/// [`ErrorKind::Unsupported`] instead of producing a truncated or guessed encoding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Limit {
    /// Lengths of 16K and more need fragmentation (X.691 11.9.3.8).
    FragmentedLength(u64),
    /// Normally small non-negative whole numbers of 64 and more (X.691 11.6.2).
    NormallySmallNumber(u64),
    /// Whole numbers whose two's-complement form needs more than 16 octets.
    IntegerOctets(u64),
    /// Binary real exponents wider than one octet.
    RealExponentOctets(usize),
    /// Binary real mantissas wider than three octets.
    RealMantissaOctets(usize),
    /// Decimal or otherwise unsupported real encodings, by their information octet.
    RealEncoding(u8),
    /// Binary reals whose magnitude cannot be represented as IEEE-754 binary32.
    RealMagnitude,
}

impl Display for Limit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Limit::FragmentedLength(len) => {
                write!(f, "length {len} requires fragmentation (max 16383)")
            }
            Limit::NormallySmallNumber(n) => {
                write!(f, "normally small number {n} exceeds 63")
            }
            Limit::IntegerOctets(octets) => {
                write!(f, "integer of {octets} octets exceeds 16 octets")
            }
            Limit::RealExponentOctets(octets) => {
                write!(f, "real exponent of {octets} octets exceeds 1 octet")
            }
            Limit::RealMantissaOctets(octets) => {
                write!(f, "real mantissa of {octets} octets exceeds 3 octets")
            }
            Limit::RealEncoding(info) => {
                write!(f, "real encoding with information octet {info:#04x}")
            }
            Limit::RealMagnitude => write!(f, "real magnitude outside of binary32"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    ValueNotInRange { value: i128, min: i128, max: i128 },
    SizeNotInRange { size: u64, min: u64, max: u64 },
    EndOfStream { needed: usize, remaining: usize },
    InsufficientSpaceInDestinationBuffer,
    InvalidEnumerationIndex { index: u64, variant_count: u64 },
    InvalidChoiceIndex { index: u64, variant_count: u64 },
    InvalidRealEncoding(u8),
    ExtensionGroupsEmpty,
    OpenTypeOverrun { consumed: usize, available: usize },
    InvalidHexString(String),
    InvalidBitString(String),
    Unsupported(Limit),
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ValueNotInRange { value, min, max } => write!(
                f,
                "The value {value} is not within the inclusive range of {min} and {max}"
            ),
            ErrorKind::SizeNotInRange { size, min, max } => write!(
                f,
                "The size {size} is not within the inclusive range of {min} and {max}"
            ),
            ErrorKind::EndOfStream { needed, remaining } => write!(
                f,
                "Needed {needed} bits but only {remaining} bits remain in the source buffer"
            ),
            ErrorKind::InsufficientSpaceInDestinationBuffer => write!(
                f,
                "There is insufficient space in the destination buffer for this operation"
            ),
            ErrorKind::InvalidEnumerationIndex {
                index,
                variant_count,
            } => write!(
                f,
                "Unexpected enumeration index {index} with variant count {variant_count}"
            ),
            ErrorKind::InvalidChoiceIndex {
                index,
                variant_count,
            } => write!(
                f,
                "Unexpected choice index {index} with variant count {variant_count}"
            ),
            ErrorKind::InvalidRealEncoding(info) => {
                write!(f, "Invalid real information octet {info:#04x}")
            }
            ErrorKind::ExtensionGroupsEmpty => write!(
                f,
                "The extension bit is set but no extension group is present"
            ),
            ErrorKind::OpenTypeOverrun {
                consumed,
                available,
            } => write!(
                f,
                "Open type content consumed {consumed} bits of {available} available bits"
            ),
            ErrorKind::InvalidHexString(s) => write!(f, "Invalid hex string: {s:?}"),
            ErrorKind::InvalidBitString(s) => write!(f, "Invalid bit string: {s:?}"),
            ErrorKind::Unsupported(limit) => write!(f, "The operation is not supported: {limit}"),
        }
    }
}
