#![allow(dead_code)]

pub use ranper::prelude::*;
use std::sync::{Arc, Mutex};

pub fn serialize(variant: Variant, value: &impl Writable) -> (usize, Vec<u8>) {
    let mut writer = PerWriter::new(variant);
    value.write(&mut writer).unwrap();
    let bits = writer.bit_len();
    (bits, writer.into_bytes_vec())
}

pub fn deserialize<T: Readable>(variant: Variant, data: &[u8], bits: usize) -> T {
    let mut reader = PerReader::from_bits(variant, data, bits);
    let result = T::read(&mut reader).unwrap();
    assert_eq!(
        0,
        reader.bits_remaining(),
        "After reading, there are still bits remaining!"
    );
    result
}

pub fn serialize_and_deserialize<T: Readable + Writable + std::fmt::Debug + PartialEq>(
    variant: Variant,
    bits: usize,
    data: &[u8],
    value: &T,
) {
    let serialized = serialize(variant, value);
    assert_eq!(
        (bits, data),
        (serialized.0, &serialized.1[..]),
        "Serialized binary data does not match"
    );
    assert_eq!(
        value,
        &deserialize::<T>(variant, data, bits),
        "Deserialized data struct does not match"
    );
}

/// Packs a string of `0` and `1` characters, spaces are ignored.
pub fn bits(text: &str) -> (usize, Vec<u8>) {
    let mut bytes = Vec::new();
    let mut len = 0;
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        if len % 8 == 0 {
            bytes.push(0x00);
        }
        if c == '1' {
            let last = bytes.len() - 1;
            bytes[last] |= 0x80 >> (len % 8);
        } else {
            assert_eq!('0', c, "Not a bit: {:?}", c);
        }
        len += 1;
    }
    (len, bytes)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub direction: Direction,
    pub operation: &'static str,
    pub kind: ErrorKind,
}

/// Remembers every reported failure.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Record>>,
}

impl RecordingSink {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn failure(&self, direction: Direction, operation: &'static str, error: &Error) {
        self.records.lock().unwrap().push(Record {
            direction,
            operation,
            kind: error.kind().clone(),
        });
    }
}
