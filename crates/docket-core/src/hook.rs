use crate::Record;

/// Capability invoked by the shared compaction routine after a record has
/// been dropped from a dataset file.
pub trait RemovalHook {
    fn on_record_removed(&mut self, record: &Record);
}

/// Stores with nothing to update on removal.
impl RemovalHook for () {
    fn on_record_removed(&mut self, _record: &Record) {}
}
