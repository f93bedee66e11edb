use crate::io::per::{Error, ErrorKind};
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter, Write};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// The octets of an OCTET STRING value. The conversions to numbers and hex text are boundary
/// helpers, the wire form is always the octets as they are.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct OctetString(Vec<u8>);

impl OctetString {
    #[inline]
    pub fn new(octets: Vec<u8>) -> Self {
        Self(octets)
    }

    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Big-endian, without leading zero octets but at least one octet long.
    pub fn from_u64(value: u64) -> Self {
        let octets = value.to_be_bytes();
        let skip = octets.iter().take_while(|o| **o == 0).count().min(7);
        Self(octets[skip..].to_vec())
    }

    /// The octets as big-endian number, `None` if there are more than 8.
    pub fn to_u64(&self) -> Option<u64> {
        if self.0.len() > 8 {
            None
        } else {
            Some(
                self.0
                    .iter()
                    .fold(0_u64, |acc, octet| (acc << 8) | u64::from(*octet)),
            )
        }
    }

    pub fn to_hex_string(&self) -> String {
        self.0
            .iter()
            .fold(String::with_capacity(self.0.len() * 2), |mut s, octet| {
                let _ = write!(s, "{octet:02x}");
                s
            })
    }

    /// Accepts upper and lower case digits, two per octet.
    pub fn from_hex_str(hex: &str) -> Result<Self, Error> {
        let invalid = || Error::from(ErrorKind::InvalidHexString(hex.to_string()));
        if hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(octets: Vec<u8>) -> Self {
        Self(octets)
    }
}

impl From<&[u8]> for OctetString {
    fn from(octets: &[u8]) -> Self {
        Self(octets.to_vec())
    }
}

impl Deref for OctetString {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for OctetString {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromStr for OctetString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl Display for OctetString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl Serialize for OctetString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}
