//! The single entry point every wrapper calls.

use crate::config::{EngineConfig, Mode};
use crate::corpus::scan_corpus;
use crate::document::Document;
use crate::error::IntegrityResult;
use crate::integrity::analyze;
use crate::policy::{decide, Action};
use crate::report::{CheckKind, Report};
use crate::validator::validate_document;
use std::path::PathBuf;

/// What to validate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Target {
    /// One document path (editor hook, watcher).
    Document(PathBuf),
    /// Every document under the configured docs root (CI).
    Corpus,
}

/// Verdict handed back to the wrapper.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome {
    pub action: Action,
    pub report: Report,
}

/// Validate `target` under `config`.
///
/// Each call reads the current on-disk state; nothing is cached between calls. Per-document
/// problems, including unparsable headers, are reported as violations. Only an unreadable
/// single-document target or a missing docs root fail the call itself.
pub fn validate(target: &Target, config: &EngineConfig) -> IntegrityResult<Outcome> {
    if config.mode.mode() == Mode::Advisory {
        tracing::warn!(
            source = %config.mode.source(),
            "advisory mode in effect: error-severity violations will not block"
        );
    }

    match target {
        Target::Document(path) => {
            let document = Document::read(path, &config.docs_root)?;
            let (_, verdict) = validate_document(&document, config);
            let action = decide(&config.mode, &verdict.violations);
            let report = Report::new(
                CheckKind::Document,
                document.rel_path,
                config,
                verdict.violations,
                None,
                action,
            );
            Ok(Outcome { action, report })
        }
        Target::Corpus => {
            let snapshot = scan_corpus(config)?;
            let analysis = analyze(&snapshot, config);
            let violations: Vec<_> = snapshot
                .into_iter()
                .flat_map(|doc| doc.verdict.violations)
                .chain(analysis.violations)
                .collect();
            let action = decide(&config.mode, &violations);
            let report = Report::new(
                CheckKind::Corpus,
                config.docs_root.display().to_string(),
                config,
                violations,
                Some(analysis.stats),
                action,
            );
            Ok(Outcome { action, report })
        }
    }
}
