use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a generated record id: a prefix of a random v4 uuid.
pub const RECORD_ID_LEN: usize = 8;

/// Short opaque identifier, unique within one dataset.
///
/// Generated ids are not checked against the dataset for collisions. With
/// 32 random bits the chance of a clash is negligible at the dataset sizes a
/// flat file is meant for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn generate() -> Self {
        let mut s = Uuid::new_v4().to_string();
        s.truncate(RECORD_ID_LEN);
        Self(s)
    }

    pub fn from_str(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
