//! Scoped working-directory change with guaranteed restoration.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// RAII guard that changes the process working directory on construction
/// and restores the previous one on drop, on every exit path.
#[derive(Debug)]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    /// Change into `dir`, remembering the current directory.
    pub fn enter(dir: &Path) -> io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir)?;
        Ok(Self { previous })
    }

    /// The directory that will be restored on drop.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            eprintln!(
                "failed to restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}
