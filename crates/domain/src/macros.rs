//! Macro for implementing string conversions on status enums
//!
//! Status values cross two text boundaries (the SQLite `status` column and
//! the JSON handed to the UI), so every status enum gets the same
//! `as_str` / `Display` / `FromStr` trio from one mapping table.
//!
//! # Example
//!
//! ```rust
//! use prashiskshan_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum DeliveryState {
//!     Waiting,
//!     Sent,
//! }
//!
//! impl_domain_status_conversions!(DeliveryState {
//!     Waiting => "waiting",
//!     Sent => "sent",
//! });
//!
//! assert_eq!(DeliveryState::Sent.as_str(), "sent");
//! assert_eq!("WAITING".parse::<DeliveryState>(), Ok(DeliveryState::Waiting));
//! ```

/// Implements `as_str`, `Display` and `FromStr` for status enums.
///
/// Parsing is case-insensitive; output is always the canonical lowercase
/// form given in the mapping.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical string form stored in the database.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
