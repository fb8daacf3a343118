//! Wires the real run context into the launch pipeline.

use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::infrastructure::traits::{RealCommandRunner, StdinConfirmation};
use crate::launcher::{environment, identity, LaunchConfig, Launcher, RunContext};

/// Run the full launch sequence against the live environment and return
/// the exit code to terminate with.
#[instrument(skip(cli, passthrough))]
pub fn execute_launch(cli: &Cli, passthrough: &[String]) -> CliResult<i32> {
    let settings = Settings::load()?;
    let config = LaunchConfig::new(cli, &settings);
    debug!("launch config: {:?}", config);

    environment::apply(&settings);

    let ctx = RunContext {
        user: identity::current_user(),
        hostname: hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    debug!("run context: {:?}", ctx);

    let runner = RealCommandRunner;
    let mut prompt = StdinConfirmation;
    let mut launcher = Launcher::new(config, &settings, &runner, &mut prompt);

    Ok(launcher.run(&ctx, passthrough)?)
}
