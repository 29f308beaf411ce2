//! Database implementations

pub mod manager;
pub mod pool;
pub mod queue_repository;

pub use manager::*;
pub use pool::*;
pub use queue_repository::*;
