//! SMS application channel
//!
//! Applicants text `APPLY <PROJECT_ID> <MESSAGE>`; the webhook handler parses
//! the body, forwards a submission and replies with TwiML.

pub mod parser;
pub mod service;
pub mod twiml;

pub use parser::parse_sms_application;
pub use service::SmsApplicationService;
pub use twiml::render_twiml;
