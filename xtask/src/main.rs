//! `cargo xtask` entrypoint.
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=docs_integrity=debug` to see
//! per-document decisions. Reports themselves are printed to stdout.

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    xtask::exit_code(xtask::execute_from_env())
}
