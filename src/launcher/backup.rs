//! Index file backup into the version-controlled tracker directory.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::errors::{LaunchError, LaunchResult};
use crate::infrastructure::traits::CommandRunner;
use crate::util::workdir::WorkingDirGuard;

/// Copy `index_file` into `backup_dir`, then stage and commit everything
/// there with a timestamped message.
///
/// The directory change is scoped: the previous working directory is
/// restored on every exit path. Copy or git failures propagate as-is; a
/// partial copy is not rolled back.
pub fn run(
    index_file: &Path,
    backup_dir: &Path,
    runner: &dyn CommandRunner,
    now: DateTime<Local>,
) -> LaunchResult<()> {
    if !index_file.is_file() {
        return Err(LaunchError::IndexNotFound(index_file.to_path_buf()));
    }
    let file_name = index_file
        .file_name()
        .ok_or_else(|| LaunchError::IndexNotFound(index_file.to_path_buf()))?;

    fs::create_dir_all(backup_dir)?;
    let dest = backup_dir.join(file_name);
    fs::copy(index_file, &dest)?;
    debug!("copied {} -> {}", index_file.display(), dest.display());

    let _guard = WorkingDirGuard::enter(backup_dir)?;
    git(runner, &["add", "-A"])?;
    let message = commit_message(now);
    git(runner, &["commit", "-m", &message])?;
    info!("committed index backup: {}", message);

    Ok(())
}

/// Human-readable commit message embedding the invocation time to the
/// second.
pub fn commit_message(now: DateTime<Local>) -> String {
    format!("index backup {}", now.format("%Y-%m-%d %H:%M:%S"))
}

fn git(runner: &dyn CommandRunner, args: &[&str]) -> LaunchResult<()> {
    let output = runner.run("git", args)?;
    if !output.status.success() {
        return Err(LaunchError::CommandFailed {
            command: format!("git {}", args.join(" ")),
            status: output.status.code().unwrap_or(-1),
        });
    }
    Ok(())
}
