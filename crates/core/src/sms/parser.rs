//! Parser for `APPLY <PROJECT_ID> <OPTIONAL_MESSAGE>` message bodies

use prashiskshan_domain::constants::{SMS_APPLY_COMMAND, SMS_DEFAULT_MESSAGE};
use prashiskshan_domain::ParsedSmsApplication;

const INVALID_FORMAT: &str = "Invalid format. Use: APPLY <PROJECT_ID> <OPTIONAL_MESSAGE>";
const WRONG_COMMAND: &str = "Command must be APPLY";
const MISSING_PROJECT: &str = "Project ID is required";

/// Parse an SMS body.
///
/// Tokens are separated by single spaces, so a doubled space after the
/// command leaves the project id empty. Parsing stops at the first error.
pub fn parse_sms_application(body: &str) -> ParsedSmsApplication {
    let parts: Vec<&str> = body.trim().split(' ').collect();

    if parts.len() < 2 {
        return rejected(INVALID_FORMAT);
    }

    let command = parts[0].to_uppercase();
    if command != SMS_APPLY_COMMAND {
        return rejected(WRONG_COMMAND);
    }

    let project_id = parts[1];
    if project_id.is_empty() {
        return rejected(MISSING_PROJECT);
    }

    let message = parts[2..].join(" ");
    let message = if message.is_empty() { SMS_DEFAULT_MESSAGE.to_string() } else { message };

    ParsedSmsApplication {
        command,
        project_id: project_id.to_string(),
        message,
        is_valid: true,
        errors: Vec::new(),
    }
}

fn rejected(error: &str) -> ParsedSmsApplication {
    ParsedSmsApplication { errors: vec![error.to_string()], ..ParsedSmsApplication::default() }
}
