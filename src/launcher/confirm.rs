//! Host-class gate with interactive confirmation.

use tracing::debug;

use crate::errors::{LaunchError, LaunchResult};
use crate::infrastructure::traits::ConfirmationSource;

const PROMPT: &str = "This host does not look like a processing node. Continue? [y/n]";

/// Hosts whose name starts with `host_prefix` proceed without a prompt.
/// Everything else requires an explicit case-insensitive y/n; any other
/// response re-prompts. Declining or hitting end of input terminates the
/// run with [`LaunchError::ConfirmationDeclined`].
pub fn host_gate(
    hostname: &str,
    host_prefix: &str,
    assume_yes: bool,
    prompt: &mut dyn ConfirmationSource,
) -> LaunchResult<()> {
    if hostname.starts_with(host_prefix) {
        debug!("host {} matches prefix {}, no prompt", hostname, host_prefix);
        return Ok(());
    }
    if assume_yes {
        debug!("--yes given, skipping confirmation on {}", hostname);
        return Ok(());
    }

    loop {
        match prompt.read_response(PROMPT)? {
            None => return Err(LaunchError::ConfirmationDeclined),
            Some(line) => match line.trim().to_ascii_lowercase().as_str() {
                "y" => return Ok(()),
                "n" => return Err(LaunchError::ConfirmationDeclined),
                _ => continue,
            },
        }
    }
}
