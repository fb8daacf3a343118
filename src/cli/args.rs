//! CLI argument definitions using clap
//!
//! The launcher only owns a closed set of flags; everything else on the
//! command line belongs to the delegate program. [`partition_args`] splits
//! the raw argv accordingly before clap ever sees it, so recognized flags
//! are picked up wherever they appear and the pass-through list keeps its
//! original order.

use std::ffi::OsString;

use clap::Parser;

/// Launcher for the event-creation submission pipeline
#[derive(Parser, Debug)]
#[command(name = "rsubmit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Back up the selected index file before delegating
    #[arg(long, overrides_with = "no_backup")]
    pub backup: bool,

    /// Skip the index file backup (default)
    #[arg(long, overrides_with = "backup")]
    pub no_backup: bool,

    /// Enforce the operator identity check
    #[arg(long, overrides_with = "ignore_user")]
    pub check_user: bool,

    /// Skip the identity check and the backup
    #[arg(long, overrides_with = "check_user")]
    pub ignore_user: bool,

    /// Answer the host confirmation prompt with yes
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Enable debug output (can be repeated)
    #[arg(short = 'd', long, action = clap::ArgAction::Count)]
    pub debug: u8,
}

/// Flags the launcher claims for itself; every other token is forwarded
/// to the delegate untouched.
const RECOGNIZED: &[&str] = &[
    "--backup",
    "--no-backup",
    "--check-user",
    "--ignore-user",
    "--yes",
    "-y",
    "--debug",
    "-d",
    "--help",
    "-h",
    "--version",
    "-V",
];

/// Split raw argv (without the program name) into launcher flags and the
/// order-preserving pass-through list.
pub fn partition_args<I>(argv: I) -> (Vec<OsString>, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut launcher = Vec::new();
    let mut passthrough = Vec::new();

    for arg in argv {
        match arg.to_str() {
            Some(s) if RECOGNIZED.contains(&s) => launcher.push(arg),
            _ => passthrough.push(arg),
        }
    }

    (launcher, passthrough)
}

/// Parse pre-partitioned launcher flags into the Cli record.
pub fn parse_launcher_flags(flags: Vec<OsString>) -> Cli {
    let mut argv = vec![OsString::from("rsubmit")];
    argv.extend(flags);
    Cli::parse_from(argv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn given_mixed_argv_when_partitioned_then_passthrough_preserves_order() {
        let (launcher, passthrough) = partition_args(os(&[
            "--subject",
            "R1001P",
            "--no-backup",
            "--experiment",
            "FR1",
            "--ignore-user",
            "--session",
            "0",
        ]));

        assert_eq!(launcher, os(&["--no-backup", "--ignore-user"]));
        assert_eq!(
            passthrough,
            os(&["--subject", "R1001P", "--experiment", "FR1", "--session", "0"])
        );
    }

    #[test]
    fn given_flag_in_any_position_when_partitioned_then_it_is_claimed() {
        for argv in [
            &["--check-user", "a", "b"][..],
            &["a", "--check-user", "b"][..],
            &["a", "b", "--check-user"][..],
        ] {
            let (launcher, passthrough) = partition_args(os(argv));
            assert_eq!(launcher, os(&["--check-user"]));
            assert_eq!(passthrough, os(&["a", "b"]));
        }
    }

    #[test]
    fn given_no_launcher_flags_when_partitioned_then_everything_passes_through() {
        let (launcher, passthrough) = partition_args(os(&["--json", "inputs.json"]));
        assert!(launcher.is_empty());
        assert_eq!(passthrough, os(&["--json", "inputs.json"]));
    }
}
