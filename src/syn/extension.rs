//! ITU-T X.691 | ISO/IEC 8825-2:2015, chapter 19.7 to 19.9, extension additions of a SEQUENCE.
//!
//! The additions are grouped, each group is present or absent as a whole. A bitmap sized to the
//! highest present group announces which follow, each present group is an open type. Groups
//! beyond what the local schema knows are skipped.

use crate::io::per::{Error, ErrorKind, PackedRead, PackedWrite, PerReader, PerWriter};

/// Presence of the extension addition groups of one sequence value. Grows on demand, never
/// shrinks.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionGroups {
    present: Vec<bool>,
}

impl ExtensionGroups {
    /// Tracks `known` groups, all absent.
    pub fn new(known: usize) -> Self {
        Self {
            present: vec![false; known],
        }
    }

    pub fn set_present(&mut self, index: usize, present: bool) {
        if index >= self.present.len() {
            self.present.resize(index + 1, false);
        }
        self.present[index] = present;
    }

    pub fn is_present(&self, index: usize) -> bool {
        self.present.get(index).copied().unwrap_or(false)
    }

    /// Number of tracked groups, present or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.present.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    /// Whether the extension bit of the sequence has to be set.
    pub fn any_present(&self) -> bool {
        self.present.iter().any(|p| *p)
    }

    pub fn highest_present(&self) -> Option<usize> {
        self.present.iter().rposition(|p| *p)
    }

    pub fn present_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.present
            .iter()
            .enumerate()
            .filter_map(|(index, present)| if *present { Some(index) } else { None })
    }
}

impl PerWriter {
    /// The bitmap up to and including the highest present group. Needs at least one present
    /// group, otherwise the extension bit of the sequence should not have been set.
    pub fn write_extension_bitmap(&mut self, groups: &ExtensionGroups) -> Result<(), Error> {
        let count = match groups.highest_present() {
            Some(highest) => highest + 1,
            None => {
                return self.trace("extension groups", Err(ErrorKind::ExtensionGroupsEmpty.into()))
            }
        };
        self.write_normally_small_length(count as u64)?;
        for index in 0..count {
            self.write_boolean(groups.is_present(index))?;
        }
        Ok(())
    }

    /// Writes the bitmap followed by one open type per present group, filled by `content` with
    /// the index of the group.
    pub fn write_extension_groups<F>(
        &mut self,
        groups: &ExtensionGroups,
        mut content: F,
    ) -> Result<(), Error>
    where
        F: FnMut(&mut PerWriter, usize) -> Result<(), Error>,
    {
        self.write_extension_bitmap(groups)?;
        for index in groups.present_indices() {
            self.write_open_type(|writer| content(writer, index))?;
        }
        Ok(())
    }
}

impl<'a> PerReader<'a> {
    /// Tracks at least `known` groups, more if the encoder announced more.
    pub fn read_extension_bitmap(&mut self, known: usize) -> Result<ExtensionGroups, Error> {
        let count = self.read_normally_small_length()? as usize;
        let mut groups = ExtensionGroups::new(known.max(count));
        for index in 0..count {
            groups.set_present(index, self.read_boolean()?);
        }
        Ok(groups)
    }

    /// Reads the bitmap and hands every present group below `known` to `content`. The content
    /// of unknown groups is skipped.
    pub fn read_extension_groups<F>(
        &mut self,
        known: usize,
        mut content: F,
    ) -> Result<ExtensionGroups, Error>
    where
        F: FnMut(&mut PerReader<'a>, usize) -> Result<(), Error>,
    {
        let groups = self.read_extension_bitmap(known)?;
        for index in groups.present_indices() {
            if index < known {
                self.read_open_type(|reader| content(reader, index))?;
            } else {
                self.skip_open_type()?;
            }
        }
        Ok(groups)
    }
}
