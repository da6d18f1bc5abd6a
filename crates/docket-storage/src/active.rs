use std::collections::HashSet;
use std::path::Path;

use docket_core::{DocketResult, Lookup, NewRecord, Record, RecordId};
use docket_queue::{Next, QueueState, ScheduleQueue, ScheduleView};

use crate::{FlatFileStore, RecordStore};

pub const ACTIVE_DATASET: &str = "typist_details.csv";

/// Dataset of projects still to be done, plus the schedule built over it.
pub struct ActiveStore {
    file: FlatFileStore,
    schedule: ScheduleQueue,
    removed: HashSet<RecordId>,
}

impl ActiveStore {
    pub fn open(dir: &Path, name: &str) -> DocketResult<Self> {
        Ok(Self {
            file: FlatFileStore::open(dir, name)?,
            schedule: ScheduleQueue::new(),
            removed: HashSet::new(),
        })
    }

    pub fn write(&mut self, new: NewRecord) -> DocketResult<Record> {
        let record = self.file.append(new)?;
        self.removed.remove(&record.id);
        Ok(record)
    }

    pub fn list_all(&mut self) -> DocketResult<Vec<Record>> {
        self.file.scan_all()
    }

    /// Look `id` up, answering from the removed set without touching the
    /// file when this store already removed it.
    pub fn search(&mut self, id: &RecordId) -> DocketResult<Lookup> {
        if self.removed.contains(id) {
            return Ok(Lookup::Removed(id.clone()));
        }
        Ok(self.file.find_by_id(id)?.into())
    }

    /// Rescan the dataset and replace the schedule snapshot with it.
    pub fn create_schedule(&mut self) -> DocketResult<Vec<Record>> {
        let all = self.file.scan_all()?;
        Ok(self.schedule.create(all).to_vec())
    }

    /// Take the next record of the current schedule.
    ///
    /// Returns `None` when no schedule was created, and on the call that runs
    /// past the end, which also clears the snapshot. A call after that
    /// rebuilds the schedule from the file.
    pub fn next_scheduled(&mut self) -> DocketResult<Option<Record>> {
        if self.schedule.is_drained() {
            self.create_schedule()?;
        }
        match self.schedule.next() {
            Next::Item(r) => Ok(Some(r)),
            Next::NoSchedule => Ok(None),
            Next::Drained => {
                self.file.invalidate();
                Ok(None)
            }
        }
    }

    /// Group the current snapshot by priority, rebuilding it first when
    /// `force_rebuild` is set.
    pub fn grouped_schedule(&mut self, force_rebuild: bool) -> DocketResult<ScheduleView> {
        if force_rebuild {
            self.create_schedule()?;
        }
        Ok(self.schedule.view())
    }

    pub fn schedule_state(&self) -> QueueState {
        self.schedule.state()
    }

    /// Compact `record` out of the dataset and drop it from the in-flight
    /// schedule. Returns whether the file held it; only then is the id
    /// remembered as removed.
    pub fn remove(&mut self, record: &Record) -> DocketResult<bool> {
        let found = self.file.remove(record, &mut self.schedule)?;
        if found {
            self.removed.insert(record.id.clone());
        }
        Ok(found)
    }
}

impl RecordStore for ActiveStore {
    fn dataset(&self) -> &FlatFileStore {
        &self.file
    }

    fn dataset_mut(&mut self) -> &mut FlatFileStore {
        &mut self.file
    }
}
