use std::path::Path;

use docket_core::DocketResult;

use crate::FlatFileStore;

/// Read-side accessors shared by the stores that wrap one dataset. Writes,
/// lookups and removal stay on the concrete stores, which add their own
/// rules on top of the file.
pub trait RecordStore {
    fn dataset(&self) -> &FlatFileStore;
    fn dataset_mut(&mut self) -> &mut FlatFileStore;

    fn path(&self) -> &Path {
        self.dataset().path()
    }

    /// Rows currently in the dataset, served from the read cache.
    fn len(&mut self) -> DocketResult<usize> {
        Ok(self.dataset_mut().records()?.len())
    }
}
