//! Queue draining: delivery port, deferred removal port and the sync engine

pub mod engine;
pub mod ports;

pub use engine::SyncEngine;
