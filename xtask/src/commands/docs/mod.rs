//! Documentation validation command family.
//!
//! Every subcommand is a caller of [`docs_integrity::validate`]; no rule logic lives here. The
//! wrappers only print the report and turn the returned action into an exit status.

mod watch;

use crate::cli::DocsCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use docs_integrity::{validate, Outcome, Target};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Run one `cargo xtask docs ...` subcommand.
pub fn run(ctx: &CommandContext, command: DocsCommand) -> XtaskResult<()> {
    match command {
        DocsCommand::Check { paths } => check_documents(ctx, &paths),
        DocsCommand::Corpus => {
            let outcome = check_corpus(ctx)?;
            fail_if_rejected(&[outcome], "docs corpus")
        }
        DocsCommand::AuditReport { output } => {
            let outcome = check_corpus(ctx)?;
            let output = output
                .map(|path| ctx.artifacts().resolve_path(&path))
                .unwrap_or_else(|| ctx.artifacts().docs_audit_report());
            write_audit_report(ctx, &outcome, &output)?;
            fail_if_rejected(&[outcome], "docs audit-report")
        }
        DocsCommand::Watch { interval_ms } => {
            watch::run(ctx, Duration::from_millis(interval_ms.max(100)))
        }
    }
}

fn check_documents(ctx: &CommandContext, paths: &[PathBuf]) -> XtaskResult<()> {
    let config = ctx.engine_config()?;
    let mut outcomes = Vec::with_capacity(paths.len());
    for path in paths {
        let path = ctx.artifacts().resolve_path(path);
        let outcome = validate(&Target::Document(path.clone()), &config)
            .map_err(|err| XtaskError::from(err).with_operation("docs check"))?;
        print!("{}", outcome.report);
        outcomes.push(outcome);
    }
    fail_if_rejected(&outcomes, "docs check")
}

fn check_corpus(ctx: &CommandContext) -> XtaskResult<Outcome> {
    let config = ctx.engine_config()?;
    let outcome = validate(&Target::Corpus, &config)
        .map_err(|err| XtaskError::from(err).with_operation("docs corpus"))?;
    print!("{}", outcome.report);
    Ok(outcome)
}

fn write_audit_report(ctx: &CommandContext, outcome: &Outcome, output: &Path) -> XtaskResult<()> {
    let body = outcome
        .report
        .to_json()
        .map_err(|err| XtaskError::io(format!("failed to serialize report: {err}")))?;
    ctx.artifacts().write_text(output, &body)?;
    eprintln!("Wrote audit report: {}", output.display());
    Ok(())
}

fn fail_if_rejected(outcomes: &[Outcome], operation: &str) -> XtaskResult<()> {
    let rejected = outcomes.iter().filter(|o| o.action.is_blocking()).count();
    if rejected == 0 {
        return Ok(());
    }
    Err(XtaskError::validation(format!(
        "{rejected} check(s) rejected; fix the listed violations"
    ))
    .with_operation(operation))
}
