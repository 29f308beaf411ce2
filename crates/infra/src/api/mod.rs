//! Remote applications API
//!
//! Delivers queued and SMS applications to the platform's
//! `POST /api/applications` endpoint, one request per delivery attempt.

pub mod applications;

pub use applications::{ApplicationsApiClient, ApplicationsApiConfig};
