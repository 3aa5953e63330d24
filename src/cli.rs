//! Command-line surface for harness binaries.
//!
//! A harness binary is one line:
//!
//! ```ignore
//! tessera::test_main!();
//! ```
//!
//! which parses the arguments below, initializes tracing, runs every
//! collected suite, and exits 0 iff everything passed.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::registry::Registry;

/// Test harness arguments.
#[derive(Parser, Debug)]
#[command(about = "Run all registered test suites", long_about = None)]
pub struct Cli {
    /// Write the report to this file instead of stderr
    #[arg(value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug-level tracing output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse arguments, run every collected suite, and translate the outcome
/// into a process exit code (all passed → 0, any failure → 1).
pub fn run() -> ExitCode {
    run_with(Cli::parse())
}

/// Like [`run`], but with pre-parsed arguments.
pub fn run_with(cli: Cli) -> ExitCode {
    init_tracing(cli.verbose);

    let registry = Registry::collected();
    if registry.is_empty() {
        tracing::warn!("no suites registered; nothing to run");
    }

    if registry.run(cli.log_file.as_deref()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init();
}

/// Generate a `main` for a test harness binary.
#[macro_export]
macro_rules! test_main {
    () => {
        fn main() -> ::std::process::ExitCode {
            $crate::cli::run()
        }
    };
}
