use std::collections::HashMap;

use super::types::FileChangeRecord;
use super::ParseError;

/// Lookup table from file path to per-file patch, preserving the order the
/// files appeared in the diff blob.
///
/// Built once per parsed pull request and swapped out wholesale when the
/// caller moves to another one; never mutated in place.
#[derive(Debug, Default)]
pub struct DiffIndex {
    records: Vec<FileChangeRecord>,
    by_path: HashMap<String, usize>,
}

impl DiffIndex {
    /// Build an index over parsed records.
    ///
    /// Fails with [`ParseError::DuplicatePath`] if two records share a
    /// post-change path, since a keyed lookup cannot represent both.
    pub fn build(records: Vec<FileChangeRecord>) -> Result<DiffIndex, ParseError> {
        let mut by_path = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if by_path.insert(record.path.clone(), i).is_some() {
                return Err(ParseError::DuplicatePath(record.path.clone()));
            }
        }
        Ok(DiffIndex { records, by_path })
    }

    /// Patch body for one file. A missing path means "no diff to show" (a
    /// file list and its index can transiently disagree), not a failure.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.by_path
            .get(path)
            .map(|&i| self.records[i].patch_body.as_str())
    }

    /// Records in the order they appeared in the blob.
    pub fn records(&self) -> &[FileChangeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
