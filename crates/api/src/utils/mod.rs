//! Host-side helpers

pub mod logging;
