//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing the launch
//! pipeline to be tested with mock implementations.

use std::io::{self, BufRead, Write};
use std::process::{Command, Output, Stdio};

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments and capture its output.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;

    /// Run a command with inherited stdio and return its exit code.
    fn status(&self, cmd: &str, args: &[&str]) -> io::Result<i32>;
}

/// Source of operator confirmation responses.
pub trait ConfirmationSource {
    /// Show `prompt` and read one response line.
    /// Returns None at end of input.
    fn read_response(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        Command::new(cmd).args(args).output()
    }

    fn status(&self, cmd: &str, args: &[&str]) -> io::Result<i32> {
        let status = Command::new(cmd)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        // A signal-terminated child has no code; report generic failure.
        Ok(status.code().unwrap_or(1))
    }
}

/// Reads confirmation responses from stdin, writing the prompt to stdout.
#[derive(Debug, Default)]
pub struct StdinConfirmation;

impl ConfirmationSource for StdinConfirmation {
    fn read_response(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{} ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().lock().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
