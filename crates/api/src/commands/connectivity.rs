//! Connectivity commands
//!
//! The host forwards the platform's online flag here. A transition to online
//! starts one sync pass in the background.

use std::time::Instant;

use prashiskshan_core::ConnectivityMonitor;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Report the platform's online flag. Returns `true` if the state changed.
pub fn set_network_status(ctx: &AppContext, online: bool) -> bool {
    let start = Instant::now();
    let changed = ctx.connectivity.set_online(online);
    log_command_execution("connectivity::set_network_status", start.elapsed(), true, None);
    changed
}

pub fn get_network_status(ctx: &AppContext) -> bool {
    ctx.connectivity.is_online()
}
