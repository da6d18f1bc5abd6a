use std::path::Path;

use docket_core::{DocketResult, Record};

use crate::{FlatFileStore, RecordStore};

pub const COMPLETED_DATASET: &str = "completed_project.csv";

/// Append-only sink for finished projects.
pub struct CompletedStore {
    file: FlatFileStore,
}

impl CompletedStore {
    pub fn open(dir: &Path, name: &str) -> DocketResult<Self> {
        Ok(Self { file: FlatFileStore::open(dir, name)? })
    }

    /// Append `record`, keeping the id it was given in the active dataset.
    pub fn write(&mut self, record: &Record) -> DocketResult<()> {
        self.file.append_record(record)
    }

    pub fn list_all(&mut self) -> DocketResult<Vec<Record>> {
        self.file.scan_all()
    }
}

impl RecordStore for CompletedStore {
    fn dataset(&self) -> &FlatFileStore {
        &self.file
    }

    fn dataset_mut(&mut self) -> &mut FlatFileStore {
        &mut self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::RecordId;
    use tempfile::tempdir;

    #[test]
    fn lists_in_insertion_order_with_original_ids() {
        let dir = tempdir().unwrap();
        let mut store = CompletedStore::open(dir.path(), COMPLETED_DATASET).unwrap();
        let first = Record { id: RecordId::from_str("zz000001"), title: "late".into(), size: 1, priority: 9 };
        let second = Record { id: RecordId::from_str("aa000002"), title: "early".into(), size: 1, priority: 0 };
        store.write(&first).unwrap();
        store.write(&second).unwrap();
        assert_eq!(store.list_all().unwrap(), vec![first, second]);
        assert_eq!(store.len().unwrap(), 2);
    }
}
