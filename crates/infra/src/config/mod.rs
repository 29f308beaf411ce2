//! Configuration loading
//!
//! Environment variables win; a JSON or TOML file is the fallback.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
