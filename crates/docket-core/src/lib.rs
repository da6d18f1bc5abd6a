pub mod error;
pub mod hook;
pub mod ids;
pub mod schedule;
pub mod types;

pub use error::*;
pub use hook::*;
pub use ids::*;
pub use schedule::*;
pub use types::*;
