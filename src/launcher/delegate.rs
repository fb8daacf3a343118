//! Delegation to the external submission program.

use tracing::info;

use crate::config::DelegateConfig;
use crate::errors::LaunchResult;
use crate::infrastructure::traits::CommandRunner;

/// Spawn the delegate with the pass-through argv appended after its base
/// arguments. Stdio is inherited; the child's exit code is returned
/// unchanged so the launcher can terminate with it.
pub fn invoke(
    delegate: &DelegateConfig,
    passthrough: &[String],
    runner: &dyn CommandRunner,
) -> LaunchResult<i32> {
    let mut args: Vec<&str> = delegate.base_args.iter().map(String::as_str).collect();
    args.extend(passthrough.iter().map(String::as_str));

    info!("delegating to {} {}", delegate.program, args.join(" "));
    Ok(runner.status(&delegate.program, &args)?)
}
