//! Workspace maintenance commands (`cargo xtask`).
//!
//! The crate is a thin CLI layer over [`docs_integrity`]. Command modules translate arguments
//! into engine calls and exit statuses, while [`runtime`] owns artifact paths, configuration
//! resolution, and error presentation.

pub mod cli;
pub mod commands;
pub mod runtime;

use crate::cli::{Cli, TopLevelCommand};
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;
use clap::Parser;
use docs_integrity::LoadOptions;

/// Executes the `xtask` binary using the current process arguments.
///
/// Parses the command line, builds a [`CommandContext`] carrying the requested config file and
/// mode override, and delegates to the owning command family.
pub fn execute_from_env() -> XtaskResult<()> {
    let cli = Cli::parse();
    match cli.command {
        TopLevelCommand::Docs(args) => {
            let ctx = CommandContext::new(LoadOptions {
                config_path: args.config,
                mode_override: args.mode,
            })?;
            commands::docs::run(&ctx, args.command)
        }
    }
}

/// Convert a command result into the process exit status, printing the error on failure.
pub fn exit_code(result: XtaskResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(1)
        }
    }
}
