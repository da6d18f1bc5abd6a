pub mod config;
pub mod repository;
pub mod seed;

pub use config::*;
pub use repository::*;
pub use seed::*;
