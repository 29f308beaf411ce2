//! Infrastructure error plumbing

mod conversions;

pub use conversions::{delivery_error_from_http, InfraError};
