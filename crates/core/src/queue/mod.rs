//! Offline queue storage ports

pub mod ports;
