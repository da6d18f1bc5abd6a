use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Record;

/// Records sharing one priority, in schedule order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBucket {
    pub priority: i64,
    pub records: Vec<Record>,
}

/// Ascending priority, then ascending size.
pub fn schedule_order(a: &Record, b: &Record) -> Ordering {
    a.priority.cmp(&b.priority).then(a.size.cmp(&b.size))
}

/// Stable sort into schedule order; records equal on both keys keep their
/// file (insertion) order.
pub fn sort_schedule(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by(schedule_order);
    records
}

/// Group an already sorted snapshot into buckets keyed by priority, emitted in
/// ascending priority order. Order within a bucket follows the snapshot.
pub fn group_by_priority(snapshot: &[Record]) -> Vec<PriorityBucket> {
    let mut buckets: BTreeMap<i64, Vec<Record>> = BTreeMap::new();
    for r in snapshot {
        buckets.entry(r.priority).or_default().push(r.clone());
    }
    buckets
        .into_iter()
        .map(|(priority, records)| PriorityBucket { priority, records })
        .collect()
}
