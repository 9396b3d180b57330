//! Top-level CLI parsing.

use clap::{Args, Parser, Subcommand};
use docs_integrity::Mode;
use std::path::PathBuf;

/// Workspace maintenance commands (`cargo xtask`).
#[derive(Debug, Parser)]
#[command(name = "xtask", about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: TopLevelCommand,
}

/// Top-level `xtask` command families.
#[derive(Debug, Subcommand)]
pub enum TopLevelCommand {
    /// Docs header, freshness, and integrity checks.
    Docs(DocsArgs),
}

#[derive(Debug, Args)]
pub struct DocsArgs {
    /// Override the configured mode (`strict` or `advisory`) for this run.
    #[arg(long, global = true)]
    pub mode: Option<Mode>,

    /// Config file to use instead of `tools/docs/integrity.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: DocsCommand,
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum DocsCommand {
    /// Check individual documents (editor and pre-commit hooks).
    Check {
        /// Documents to check.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Check the whole corpus, including cross-document integrity (CI).
    Corpus,
    /// Check the whole corpus and write the report as JSON.
    AuditReport {
        /// Output path; defaults to `.artifacts/docs-audit.json`.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Re-check documents whenever they change on disk.
    Watch {
        /// Polling interval in milliseconds.
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}
