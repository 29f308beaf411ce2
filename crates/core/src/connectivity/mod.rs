//! Network state observation

pub mod ports;
