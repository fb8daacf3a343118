//! Operator identity resolution and the user -> index file lookup.

use std::env;
use std::path::PathBuf;

use crate::config::Settings;
use crate::errors::{LaunchError, LaunchResult};

use super::RunContext;

/// `logname` equivalent: LOGNAME first, then USER.
pub fn current_user() -> Option<String> {
    env::var("LOGNAME")
        .or_else(|_| env::var("USER"))
        .ok()
        .filter(|u| !u.is_empty())
}

/// Map the invoking user to the index file they maintain.
///
/// A user outside the route table is an error; callers must not touch the
/// filesystem or spawn the delegate afterwards.
pub fn index_route(ctx: &RunContext, settings: &Settings) -> LaunchResult<PathBuf> {
    let user = ctx.user.as_deref().ok_or(LaunchError::UnknownUser)?;
    settings
        .index_route(user)
        .cloned()
        .ok_or_else(|| LaunchError::UnauthorizedUser {
            user: user.to_string(),
        })
}
