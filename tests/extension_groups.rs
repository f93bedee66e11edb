mod test_utils;

use test_utils::*;

/// ```asn1
/// ServedCell ::= SEQUENCE {
///     pci INTEGER (0..1007),
///     ...,
///     [[ ranac INTEGER (0..255) ]],
///     [[ band INTEGER (0..255) ]],
///     [[ tdd-pattern INTEGER (0..255) ]],
///     [[ sul-band INTEGER (0..255) ]]
/// }
/// ```
#[derive(Debug, Default, PartialEq)]
struct ServedCell {
    pci: u16,
    groups: [Option<u8>; 4],
}

/// The same type as seen by a peer that only knows the first two groups.
#[derive(Debug, Default, PartialEq)]
struct LegacyServedCell {
    pci: u16,
    groups: [Option<u8>; 2],
}

fn write_served_cell(writer: &mut PerWriter, pci: u16, values: &[Option<u8>]) -> Result<(), Error> {
    let mut groups = ExtensionGroups::new(values.len());
    for (index, value) in values.iter().enumerate() {
        groups.set_present(index, value.is_some());
    }
    let mut preamble = SequencePreamble::new(true, 0);
    preamble.set_extended(groups.any_present());

    writer.write_sequence_preamble(&preamble)?;
    writer.write_integer::<u16>(Some(0), Some(1007), false, pci)?;
    if preamble.is_extended() {
        writer.write_extension_groups(&groups, |w, index| match values[index] {
            Some(value) => w.write_integer::<u8>(Some(0), Some(255), false, value),
            None => Ok(()),
        })?;
    }
    Ok(())
}

fn read_served_cell(reader: &mut PerReader<'_>, values: &mut [Option<u8>]) -> Result<u16, Error> {
    let preamble = reader.read_sequence_preamble(true, 0)?;
    let pci = reader.read_integer::<u16>(Some(0), Some(1007), false)?;
    if preamble.is_extended() {
        reader.read_extension_groups(values.len(), |r, index| {
            values[index] = Some(r.read_integer::<u8>(Some(0), Some(255), false)?);
            Ok(())
        })?;
    }
    Ok(pci)
}

impl Writable for ServedCell {
    fn write(&self, writer: &mut PerWriter) -> Result<(), Error> {
        write_served_cell(writer, self.pci, &self.groups)
    }
}

impl Readable for ServedCell {
    fn read(reader: &mut PerReader<'_>) -> Result<Self, Error> {
        let mut value = ServedCell::default();
        value.pci = read_served_cell(reader, &mut value.groups)?;
        Ok(value)
    }
}

impl Writable for LegacyServedCell {
    fn write(&self, writer: &mut PerWriter) -> Result<(), Error> {
        write_served_cell(writer, self.pci, &self.groups)
    }
}

impl Readable for LegacyServedCell {
    fn read(reader: &mut PerReader<'_>) -> Result<Self, Error> {
        let mut value = LegacyServedCell::default();
        value.pci = read_served_cell(reader, &mut value.groups)?;
        Ok(value)
    }
}

#[test]
fn test_without_extensions() {
    // 0 | 0111110100
    let (bits, bytes) = bits("0 0111110100");
    serialize_and_deserialize(
        Variant::Unaligned,
        bits,
        &bytes,
        &ServedCell {
            pci: 500,
            groups: [None; 4],
        },
    );
}

#[test]
fn test_bitmap_and_frames() {
    // 1 | 0111110100 | 0 000001 | 0 1 | 00000001 00001001
    let (bits, bytes) = bits("1 0111110100 0000001 01 00000001 00001001");
    serialize_and_deserialize(
        Variant::Unaligned,
        bits,
        &bytes,
        &ServedCell {
            pci: 500,
            groups: [None, Some(9), None, None],
        },
    );
}

#[test]
fn test_unknown_groups_are_skipped() {
    let newer = ServedCell {
        pci: 1,
        groups: [Some(10), None, None, Some(40)],
    };
    for variant in [Variant::Aligned, Variant::Unaligned] {
        let mut writer = PerWriter::new(variant);
        newer.write(&mut writer).unwrap();
        writer.write_boolean(true).unwrap();
        let bytes = writer.into_bytes_vec();

        let mut reader = PerReader::new(variant, &bytes);
        let legacy = LegacyServedCell::read(&mut reader).unwrap();
        assert_eq!(
            LegacyServedCell {
                pci: 1,
                groups: [Some(10), None],
            },
            legacy
        );
        // the field behind the sequence is still in sync
        assert!(reader.read_boolean().unwrap());
    }
}

#[test]
fn test_decoder_grows_beyond_known_groups() {
    let mut preamble = SequencePreamble::new(true, 0);
    preamble.set_extended(true);
    let mut writer = PerWriter::unaligned();
    writer.write_sequence_preamble(&preamble).unwrap();
    writer.write_integer::<u16>(Some(0), Some(1007), false, 7).unwrap();
    let mut groups = ExtensionGroups::new(0);
    groups.set_present(5, true);
    writer
        .write_extension_groups(&groups, |w, _| w.write_boolean(true))
        .unwrap();
    let bytes = writer.into_bytes_vec();

    let mut reader = PerReader::unaligned(&bytes);
    reader.read_sequence_preamble(true, 0).unwrap();
    reader.read_integer::<u16>(Some(0), Some(1007), false).unwrap();
    let decoded = reader
        .read_extension_groups(2, |_, _| panic!("no known group is present"))
        .unwrap();
    assert_eq!(6, decoded.len());
    assert_eq!(vec![5], decoded.present_indices().collect::<Vec<_>>());
    assert_eq!(0, reader.bits_remaining());
}

#[test]
fn test_older_encoder_newer_decoder() {
    let legacy = LegacyServedCell {
        pci: 1007,
        groups: [None, Some(2)],
    };
    let bytes = encode(Variant::Aligned, &legacy).unwrap();
    let newer = decode::<ServedCell>(Variant::Aligned, &bytes).unwrap();
    assert_eq!(
        ServedCell {
            pci: 1007,
            groups: [None, Some(2), None, None],
        },
        newer
    );
}
