//! Single-document validation: header parsing followed by the schema rules.

use crate::config::EngineConfig;
use crate::document::Document;
use crate::error::{MalformedHeaderError, MalformedHeaderKind};
use crate::header::{parse_header, ParsedDocument};
use crate::schema::check_header;
use crate::verdict::{RuleCode, Verdict, Violation};

/// Validate raw document text. Never mutates anything; the verdict is the only output.
pub fn validate_text(rel_path: &str, text: &str, config: &EngineConfig) -> Verdict {
    validate_parsed(rel_path, text, config).1
}

/// Validate a document that has already been read from disk.
pub fn validate_document(document: &Document, config: &EngineConfig) -> (Option<ParsedDocument>, Verdict) {
    validate_parsed(&document.rel_path, &document.text, config)
}

pub(crate) fn validate_parsed(
    rel_path: &str,
    text: &str,
    config: &EngineConfig,
) -> (Option<ParsedDocument>, Verdict) {
    let mut verdict = Verdict::new(rel_path);
    match parse_header(text) {
        Ok(parsed) => {
            check_header(&parsed.header, config, &mut verdict);
            tracing::debug!(
                path = rel_path,
                violations = verdict.violations.len(),
                "validated document"
            );
            (Some(parsed), verdict)
        }
        Err(err) => {
            tracing::debug!(path = rel_path, error = %err, "header parse failed");
            verdict.violations.push(malformed_header_violation(rel_path, &err));
            (None, verdict)
        }
    }
}

fn malformed_header_violation(rel_path: &str, err: &MalformedHeaderError) -> Violation {
    let violation = Violation::error(rel_path, RuleCode::MalformedHeader, err.to_string());
    match &err.kind {
        MalformedHeaderKind::UnrecognizedLine { line, .. }
        | MalformedHeaderKind::DuplicateKey { line, .. } => violation.at_line(*line),
        MalformedHeaderKind::MissingStart | MalformedHeaderKind::Unterminated => violation,
    }
}
