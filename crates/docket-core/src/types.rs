use serde::{Deserialize, Serialize};

use crate::{error::DocketError, ids::RecordId};

/// A persisted project work item. Lower `priority` is scheduled first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub size: u64,
    pub priority: i64,
}

/// Caller-supplied fields of a record that has not been persisted yet.
/// The store assigns the id on first write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRecord {
    pub title: String,
    pub size: u64,
    pub priority: i64,
}

impl NewRecord {
    pub fn new(title: impl Into<String>, size: u64, priority: i64) -> Self {
        Self { title: title.into(), size, priority }
    }

    /// Reject input the flat-file row format cannot carry.
    pub fn validate(&self) -> Result<(), DocketError> {
        if self.title.trim().is_empty() {
            return Err(DocketError::InvalidInput("title is required".into()));
        }
        if self.title.contains([',', '\n', '\r']) {
            return Err(DocketError::InvalidInput(format!(
                "title may not contain a comma or line break: {:?}",
                self.title
            )));
        }
        Ok(())
    }

    pub fn with_id(self, id: RecordId) -> Record {
        Record { id, title: self.title, size: self.size, priority: self.priority }
    }
}

/// Result of looking a record up by id in the active dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    Found(Record),
    /// Removed earlier in this process; the file was not scanned.
    Removed(RecordId),
    NotFound,
}

impl Lookup {
    pub fn found(self) -> Option<Record> {
        match self {
            Lookup::Found(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Option<Record>> for Lookup {
    fn from(value: Option<Record>) -> Self {
        value.map(Lookup::Found).unwrap_or(Lookup::NotFound)
    }
}
