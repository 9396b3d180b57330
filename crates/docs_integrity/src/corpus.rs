//! Whole-corpus scan: the parallel parse-and-check phase.
//!
//! Every document is read, parsed, and validated independently on a small pool of scoped
//! threads. The phase ends with all workers joined, producing an immutable snapshot in path order
//! that the integrity analysis consumes afterwards.

use crate::config::EngineConfig;
use crate::document::{collect_documents, display_path, Document};
use crate::error::{IntegrityError, IntegrityResult};
use crate::header::ParsedDocument;
use crate::validator::validate_document;
use crate::verdict::{RuleCode, Verdict};
use std::path::{Path, PathBuf};
use std::thread;

/// One document's state after the per-document phase.
#[derive(Clone, Debug)]
pub struct ScannedDocument {
    pub rel_path: String,
    /// `None` when the file could not be read or its header could not be parsed.
    pub parsed: Option<ParsedDocument>,
    pub verdict: Verdict,
}

/// Read, parse, and validate every document under the configured docs root.
pub fn scan_corpus(config: &EngineConfig) -> IntegrityResult<Vec<ScannedDocument>> {
    let paths = collect_documents(&config.docs_root)?;
    let workers = thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(1)
        .min(paths.len().max(1));
    let chunk_size = paths.len().div_ceil(workers).max(1);

    tracing::info!(
        root = %config.docs_root.display(),
        documents = paths.len(),
        workers,
        "scanning corpus"
    );

    let snapshot = thread::scope(|scope| {
        let handles: Vec<_> = paths
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || scan_chunk(chunk, config)))
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(scanned) => scanned,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect::<Vec<_>>()
    });

    Ok(snapshot)
}

fn scan_chunk(paths: &[PathBuf], config: &EngineConfig) -> Vec<ScannedDocument> {
    paths.iter().map(|path| scan_one(path, config)).collect()
}

fn scan_one(path: &Path, config: &EngineConfig) -> ScannedDocument {
    match Document::read(path, &config.docs_root) {
        Ok(document) => {
            let (parsed, verdict) = validate_document(&document, config);
            ScannedDocument {
                rel_path: document.rel_path,
                parsed,
                verdict,
            }
        }
        Err(err) => {
            let rel_path = display_path(&config.docs_root, path);
            tracing::warn!(path = %rel_path, error = %err, "document unreadable");
            let reason = match &err {
                IntegrityError::Io { source, .. } => source.kind().to_string(),
                other => other.to_string(),
            };
            let mut verdict = Verdict::new(rel_path.clone());
            verdict.push_error(
                RuleCode::Unreadable,
                format!("could not read {rel_path}: {reason}"),
            );
            ScannedDocument {
                rel_path,
                parsed: None,
                verdict,
            }
        }
    }
}
