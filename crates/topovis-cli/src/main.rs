//! topovis CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use topovis_cli::{Args, error_adapter::render_reports};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting topovis");
    debug!(args:?; "Parsed arguments");

    match topovis_cli::run(&args) {
        Ok(summary) if summary.failed() > 0 => {
            error!(
                rendered = summary.rendered(),
                failed = summary.failed();
                "Some networks could not be rendered"
            );
            process::exit(1);
        }
        Ok(summary) => {
            info!(rendered = summary.rendered(); "Completed successfully");
        }
        Err(err) => {
            for report in render_reports(&err) {
                error!("{report}");
            }
            process::exit(1);
        }
    }
}
