use docket_core::Record;

/// In-memory copy of a dataset's rows.
///
/// Every mutation of the dataset marks the cache stale; every read through
/// [`ReadCache::get_or_load`] rebuilds it first when stale.
#[derive(Debug, Default)]
pub enum ReadCache {
    #[default]
    Stale,
    Fresh(Vec<Record>),
}

impl ReadCache {
    pub fn invalidate(&mut self) {
        *self = ReadCache::Stale;
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, ReadCache::Fresh(_))
    }

    pub fn get_or_load<E>(&mut self, load: impl FnOnce() -> Result<Vec<Record>, E>) -> Result<&[Record], E> {
        if !self.is_fresh() {
            *self = ReadCache::Fresh(load()?);
        }
        match self {
            ReadCache::Fresh(records) => Ok(records.as_slice()),
            ReadCache::Stale => Ok(&[]),
        }
    }
}
