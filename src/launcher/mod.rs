//! Sequential launch pipeline: identity check, index backup, host gate,
//! delegation.
//!
//! All control state lives in a single immutable [`LaunchConfig`] built
//! once from the parsed flags and settings; the pipeline itself threads no
//! mutable flags.

pub mod backup;
pub mod confirm;
pub mod delegate;
pub mod environment;
pub mod identity;

use chrono::Local;
use tracing::debug;

use crate::cli::args::Cli;
use crate::config::Settings;
use crate::errors::LaunchResult;
use crate::infrastructure::traits::{CommandRunner, ConfirmationSource};

/// Immutable per-invocation control record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConfig {
    pub backup: bool,
    pub check_user: bool,
    pub assume_yes: bool,
}

impl LaunchConfig {
    /// Derive the control record from flags layered over settings.
    /// `--ignore-user` wins over everything else and also forces the
    /// backup off.
    pub fn new(cli: &Cli, settings: &Settings) -> Self {
        let mut backup = settings.backup;
        let mut check_user = settings.check_user;

        if cli.backup {
            backup = true;
        }
        if cli.no_backup {
            backup = false;
        }
        if cli.check_user {
            check_user = true;
        }
        if cli.ignore_user {
            check_user = false;
            backup = false;
        }

        Self {
            backup,
            check_user,
            assume_yes: cli.yes,
        }
    }
}

/// Identity of the invoking user and host, resolved before the run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub user: Option<String>,
    pub hostname: String,
}

/// Drives the guarded launch sequence against injected I/O boundaries.
pub struct Launcher<'a> {
    config: LaunchConfig,
    settings: &'a Settings,
    runner: &'a dyn CommandRunner,
    prompt: &'a mut dyn ConfirmationSource,
}

impl<'a> Launcher<'a> {
    pub fn new(
        config: LaunchConfig,
        settings: &'a Settings,
        runner: &'a dyn CommandRunner,
        prompt: &'a mut dyn ConfirmationSource,
    ) -> Self {
        Self {
            config,
            settings,
            runner,
            prompt,
        }
    }

    /// Run the sequence and return the delegate's exit code.
    ///
    /// Guards fire strictly before any side effect: an unauthorized user
    /// terminates the run before the backup touches the filesystem and
    /// before the delegate is spawned.
    pub fn run(&mut self, ctx: &RunContext, passthrough: &[String]) -> LaunchResult<i32> {
        if self.config.check_user {
            let route = identity::index_route(ctx, self.settings)?;
            debug!("operator index route: {}", route.display());
        }

        if self.config.backup {
            let route = identity::index_route(ctx, self.settings)?;
            backup::run(&route, &self.settings.backup_dir, self.runner, Local::now())?;
        }

        confirm::host_gate(
            &ctx.hostname,
            &self.settings.host_prefix,
            self.config.assume_yes,
            self.prompt,
        )?;

        delegate::invoke(&self.settings.delegate, passthrough, self.runner)
    }
}
