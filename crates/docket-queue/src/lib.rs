use docket_core::{group_by_priority, sort_schedule, PriorityBucket, Record, RemovalHook};

/// Where the consumption cursor stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueState {
    /// No schedule has been created yet.
    NoSchedule,
    /// A schedule exists with `remaining` unconsumed items.
    Remaining(usize),
    /// The last schedule was consumed past its end and cleared.
    Drained,
}

/// Result of asking for the next scheduled record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Next {
    Item(Record),
    /// `create` has never been called.
    NoSchedule,
    /// The cursor ran past the end; the snapshot has been cleared.
    Drained,
}

/// Grouped projection of the current snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScheduleView {
    NotCreated,
    /// A schedule was created but holds no records.
    Empty,
    Grouped(Vec<PriorityBucket>),
}

impl ScheduleView {
    /// Buckets plus whether they are a meaningful, created schedule.
    pub fn into_parts(self) -> (Vec<PriorityBucket>, bool) {
        match self {
            ScheduleView::Grouped(buckets) => (buckets, true),
            ScheduleView::NotCreated | ScheduleView::Empty => (Vec::new(), false),
        }
    }
}

/// Point-in-time schedule snapshot with a single sequential consumer.
///
/// The snapshot does not follow later writes to the dataset; it changes only
/// through `create`, consumption, and removal notifications.
#[derive(Debug, Default)]
pub struct ScheduleQueue {
    snapshot: Vec<Record>,
    cursor: usize,
    created: bool,
    drained: bool,
}

impl ScheduleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with `records` in schedule order and rewind.
    pub fn create(&mut self, records: Vec<Record>) -> &[Record] {
        self.snapshot = sort_schedule(records);
        self.cursor = 0;
        self.created = true;
        self.drained = false;
        tracing::info!(items = self.snapshot.len(), "schedule created");
        &self.snapshot
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn is_drained(&self) -> bool {
        self.drained
    }

    pub fn snapshot(&self) -> &[Record] {
        &self.snapshot
    }

    pub fn state(&self) -> QueueState {
        if !self.created {
            QueueState::NoSchedule
        } else if self.drained {
            QueueState::Drained
        } else {
            QueueState::Remaining(self.snapshot.len().saturating_sub(self.cursor))
        }
    }

    /// Serve the item under the cursor and advance. Running past the end
    /// clears the snapshot and rewinds the cursor.
    pub fn next(&mut self) -> Next {
        if !self.created {
            return Next::NoSchedule;
        }
        match self.snapshot.get(self.cursor) {
            Some(r) => {
                self.cursor += 1;
                Next::Item(r.clone())
            }
            None => {
                tracing::debug!(consumed = self.cursor, "schedule drained");
                self.snapshot.clear();
                self.cursor = 0;
                self.drained = true;
                Next::Drained
            }
        }
    }

    /// Group the current snapshot without rescanning anything.
    pub fn view(&self) -> ScheduleView {
        if !self.created {
            ScheduleView::NotCreated
        } else if self.snapshot.is_empty() {
            ScheduleView::Empty
        } else {
            ScheduleView::Grouped(group_by_priority(&self.snapshot))
        }
    }
}

impl RemovalHook for ScheduleQueue {
    fn on_record_removed(&mut self, record: &Record) {
        if let Some(pos) = self.snapshot.iter().position(|r| r.id == record.id) {
            self.snapshot.remove(pos);
            if pos < self.cursor {
                self.cursor -= 1;
            }
        }
    }
}
