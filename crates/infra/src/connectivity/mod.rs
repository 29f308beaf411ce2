//! Host-fed connectivity signal

mod signal;

pub use signal::ConnectivitySignal;
