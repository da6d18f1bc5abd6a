use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docket_core::{DocketError, DocketResult, Lookup, NewRecord, PriorityBucket, Record, RecordId};
use docket_queue::QueueState;
use docket_storage::{ActiveStore, CompletedStore, RecordStore};
use rand::Rng;
use thiserror::Error;

use crate::{seed::random_record, Config};

/// Failure while moving the next scheduled record to the completed dataset.
/// Each variant names the step that failed.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("could not take the next scheduled record: {0}")]
    Schedule(#[source] DocketError),
    #[error("could not archive {id}; it is still active: {source}")]
    Archive {
        id: RecordId,
        #[source]
        source: DocketError,
    },
    #[error("{} was archived but is still in the active dataset: {source}", .record.id)]
    Remove {
        record: Record,
        #[source]
        source: DocketError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub active: usize,
    pub completed: usize,
    pub schedule: QueueState,
    pub active_file: PathBuf,
    pub completed_file: PathBuf,
}

/// Entry point for callers: coordinates the active and completed datasets
/// under one root.
pub struct Repository {
    pub root: PathBuf,
    pub cfg: Config,
    data_dir: PathBuf,
    active: ActiveStore,
    completed: Option<CompletedStore>,
}

impl Repository {
    pub fn open(root: PathBuf) -> Result<Self> {
        let cfg = Config::load_or_init(&root)?;
        let data_dir = cfg.data_dir(&root);
        let active = ActiveStore::open(&data_dir, &cfg.storage.active_file)
            .with_context(|| format!("open active dataset in {}", data_dir.display()))?;
        Ok(Self { root, cfg, data_dir, active, completed: None })
    }

    /// Write the default config and both dataset files under `root`.
    pub fn init(root: &Path) -> Result<()> {
        let mut repo = Self::open(root.to_path_buf())?;
        repo.completed().context("open completed dataset")?;
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn completed(&mut self) -> DocketResult<&mut CompletedStore> {
        let store = match self.completed.take() {
            Some(store) => store,
            None => CompletedStore::open(&self.data_dir, &self.cfg.storage.completed_file)?,
        };
        Ok(self.completed.insert(store))
    }

    pub fn write(&mut self, title: impl Into<String>, size: u64, priority: i64) -> DocketResult<Record> {
        self.active.write(NewRecord::new(title, size, priority))
    }

    pub fn search(&mut self, id: &RecordId) -> DocketResult<Lookup> {
        self.active.search(id)
    }

    pub fn list_all(&mut self) -> DocketResult<Vec<Record>> {
        self.active.list_all()
    }

    pub fn list_completed(&mut self) -> DocketResult<Vec<Record>> {
        self.completed()?.list_all()
    }

    pub fn create_schedule(&mut self) -> DocketResult<Vec<Record>> {
        self.active.create_schedule()
    }

    /// Grouped schedule plus whether it is a created, non-empty schedule.
    pub fn view_schedule(&mut self, force_rebuild: bool) -> DocketResult<(Vec<PriorityBucket>, bool)> {
        Ok(self.active.grouped_schedule(force_rebuild)?.into_parts())
    }

    /// Take the next scheduled record, archive it to the completed dataset and
    /// remove it from the active one.
    pub fn take_next_scheduled(&mut self) -> Result<Option<Record>, TransferError> {
        let Some(record) = self.active.next_scheduled().map_err(TransferError::Schedule)? else {
            return Ok(None);
        };
        self.completed()
            .and_then(|c| c.write(&record))
            .map_err(|source| TransferError::Archive { id: record.id.clone(), source })?;
        self.active
            .remove(&record)
            .map_err(|source| TransferError::Remove { record: record.clone(), source })?;
        tracing::info!(id = %record.id, "moved record to completed");
        Ok(Some(record))
    }

    /// Write `count` random records to the active dataset.
    pub fn seed<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> DocketResult<Vec<Record>> {
        let mut written = Vec::with_capacity(count);
        for _ in 0..count {
            let new = random_record(rng, &self.cfg.seed);
            written.push(self.active.write(new)?);
        }
        tracing::info!(count, "seeded active dataset");
        Ok(written)
    }

    pub fn status(&mut self) -> DocketResult<Status> {
        let active = self.active.len()?;
        let active_file = self.active.path().to_path_buf();
        let completed_store = self.completed()?;
        let completed = completed_store.len()?;
        let completed_file = completed_store.path().to_path_buf();
        Ok(Status { active, completed, schedule: self.active.schedule_state(), active_file, completed_file })
    }
}
