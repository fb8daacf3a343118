use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::exitcode;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("unrecognized user: {user}")]
    UnauthorizedUser { user: String },

    #[error("cannot determine invoking user (LOGNAME/USER unset)")]
    UnknownUser,

    #[error("run aborted by operator")]
    ConfirmationDeclined,

    #[error("index file not found: {0}")]
    IndexNotFound(PathBuf),

    #[error("command `{command}` exited with status {status}")]
    CommandFailed { command: String, status: i32 },

    #[error("config error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type LaunchResult<T> = Result<T, LaunchError>;

impl LaunchError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::UnauthorizedUser { .. } | LaunchError::UnknownUser => exitcode::NOPERM,
            LaunchError::ConfirmationDeclined => exitcode::FAILURE,
            LaunchError::IndexNotFound(_) => exitcode::NOINPUT,
            LaunchError::CommandFailed { .. } => exitcode::SOFTWARE,
            LaunchError::Config { .. } => exitcode::CONFIG,
            LaunchError::Io(_) => exitcode::IOERR,
        }
    }
}
