//! `fluent-builder`: generate a fluent Java builder from a JSON type model
//!
//! The generated compilation unit goes to stdout unless `--output` is given. Diagnostics go to
//! stderr, or to `--log-file`.

mod args;
mod command;
mod config;
mod error;
mod support;

use std::process::ExitCode;

use clap::Parser;

use crate::args::Args;
use crate::support::tracing::init_tracing;

fn main() -> ExitCode {
    let args = Args::parse();

    // Keep the guard alive so buffered file output is flushed on exit
    let _guard = match init_tracing(args.log_level, args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(report) => {
            eprintln!("{report:?}");
            return ExitCode::FAILURE;
        },
    };

    match command::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            tracing::error!(error = %report.current_context(), "Generation failed");
            eprintln!("{report:?}");
            ExitCode::FAILURE
        },
    }
}
