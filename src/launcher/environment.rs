//! Process environment preparation for the delegate.

use std::env;

use tracing::debug;

use crate::config::Settings;

pub const FREESURFER_HOME: &str = "FREESURFER_HOME";

/// Export FREESURFER_HOME and prepend the R binary directory to PATH.
/// Values stay set for the lifetime of the invocation and are inherited
/// by the delegate.
pub fn apply(settings: &Settings) {
    env::set_var(FREESURFER_HOME, &settings.freesurfer_home);

    let r_bin = settings.r_bin_dir.to_string_lossy();
    let path = env::var("PATH").unwrap_or_default();
    if !path.split(':').any(|entry| entry == r_bin) {
        env::set_var("PATH", format!("{}:{}", r_bin, path));
    }

    debug!(
        "environment: FREESURFER_HOME={}, PATH prefixed with {}",
        settings.freesurfer_home.display(),
        r_bin
    );
}
