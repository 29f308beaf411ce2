//! Commands - UI host to backend bridge
//!
//! Every command returns `Result<_, String>` so a host can forward the error
//! text to its frontend unchanged.

mod applications;
mod connectivity;
mod sms;

pub use applications::*;
pub use connectivity::*;
pub use sms::*;
