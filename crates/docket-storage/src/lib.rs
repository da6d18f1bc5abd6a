pub mod active;
pub mod cache;
pub mod codec;
pub mod completed;
pub mod flat_file;
pub mod traits;

pub use active::*;
pub use cache::ReadCache;
pub use completed::*;
pub use flat_file::FlatFileStore;
pub use traits::RecordStore;
