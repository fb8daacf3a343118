use std::ffi::OsString;
use std::{env, process};

use colored::Colorize;
use rsubmit::cli::args::{parse_launcher_flags, partition_args};
use rsubmit::cli::commands::execute_launch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let (launcher_flags, passthrough) = partition_args(env::args_os().skip(1));
    let cli = parse_launcher_flags(launcher_flags);

    setup_logging(cli.debug);

    let passthrough: Vec<String> = passthrough
        .into_iter()
        .map(|arg: OsString| arg.to_string_lossy().into_owned())
        .collect();

    match execute_launch(&cli, &passthrough) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            process::exit(e.exit_code());
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Formatted output goes to stderr so the delegate owns stdout.
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
