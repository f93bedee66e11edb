mod test_utils;

use test_utils::*;

#[test]
fn test_127_is_one_octet() {
    let mut writer = PerWriter::unaligned();
    writer.write_length_determinant(None, None, 127).unwrap();
    assert_eq!(8, writer.bit_len());
    assert_eq!(0, writer.byte_content()[0] & 0x80);
}

#[test]
fn test_128_is_two_octets() {
    let mut writer = PerWriter::unaligned();
    writer.write_length_determinant(None, None, 128).unwrap();
    assert_eq!(16, writer.bit_len());
    assert_eq!(0b10, writer.byte_content()[0] >> 6);
}

#[test]
fn test_aligned_long_form_round_trip() {
    for len in [128_u64, 255, 256, 4097, 16_000, 16_383] {
        let mut writer = PerWriter::aligned();
        writer.write_boolean(false).unwrap();
        writer.write_length_determinant(None, None, len).unwrap();
        let bytes = writer.into_bytes_vec();
        assert_eq!(3, bytes.len());
        assert_eq!(len, u64::from(bytes[1] - 0x80) * 256 + u64::from(bytes[2]));

        let mut reader = PerReader::aligned(&bytes);
        assert!(!reader.read_boolean().unwrap());
        assert_eq!(len, reader.read_length_determinant(None, None).unwrap());
        assert_eq!(0, reader.bits_remaining());
    }
}

#[test]
fn test_fragmented_length_is_reported() {
    let sink = RecordingSink::shared();
    let mut writer = PerWriter::unaligned().with_sink(sink.clone());
    let err = writer
        .write_length_determinant(None, None, 16_384)
        .unwrap_err();
    assert_eq!(Category::Unsupported, err.category());
    assert_eq!(
        vec![Record {
            direction: Direction::Encode,
            operation: "length determinant",
            kind: ErrorKind::Unsupported(Limit::FragmentedLength(16_384)),
        }],
        sink.records()
    );
}

#[test]
fn test_bounded_below_64k_is_constrained() {
    for variant in [Variant::Aligned, Variant::Unaligned] {
        let mut writer = PerWriter::new(variant);
        writer
            .write_length_determinant(Some(1), Some(256), 256)
            .unwrap();
        // 8 bits in both variants, the aligned one pads them to an octet
        assert_eq!(8, writer.bit_len());
        assert_eq!(&[0xFF], writer.byte_content());
    }
}

#[test]
fn test_sequence_of_count() {
    let mut writer = PerWriter::unaligned();
    writer.write_sequence_of_len(Some(1), Some(16), false, 16).unwrap();
    writer.write_sequence_of_len(Some(3), Some(3), false, 3).unwrap();
    assert_eq!(4, writer.bit_len());

    let bytes = writer.into_bytes_vec();
    let mut reader = PerReader::unaligned(&bytes);
    assert_eq!(16, reader.read_sequence_of_len(Some(1), Some(16), false).unwrap());
    assert_eq!(3, reader.read_sequence_of_len(Some(3), Some(3), false).unwrap());
}
