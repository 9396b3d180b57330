//! Error types for the validation engine.
//!
//! Only failures that leave nothing to validate surface as [`IntegrityError`]. Everything the
//! engine can attribute to one document (including a header it cannot parse) is reported as a
//! [`Violation`](crate::verdict::Violation) instead.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience result type for engine entry points.
pub type IntegrityResult<T> = Result<T, IntegrityError>;

/// Fatal engine failures.
#[derive(Debug, Error)]
pub enum IntegrityError {
    /// A document or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Configuration could not be loaded or is semantically invalid.
    #[error("invalid configuration {}: {message}", path.display())]
    Config {
        /// Configuration source (file path or environment variable name).
        path: PathBuf,
        /// Human-readable reason.
        message: String,
    },
    /// The corpus root passed to an integrity scan does not exist.
    #[error("docs root does not exist: {}", .0.display())]
    CorpusRootMissing(PathBuf),
}

impl IntegrityError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Structural failure of the header block.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("malformed header: {kind}")]
pub struct MalformedHeaderError {
    /// What went wrong.
    pub kind: MalformedHeaderKind,
}

/// Reasons a header block is rejected.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MalformedHeaderKind {
    /// The document does not open with the boundary marker.
    #[error("header block is absent (document must start with `---`)")]
    MissingStart,
    /// No closing boundary marker was found.
    #[error("header block is not terminated by `---`")]
    Unterminated,
    /// A header line is not a `key: value` pair.
    #[error("line {line} is not a `key: value` pair: `{text}`")]
    UnrecognizedLine {
        /// 1-based line number within the document.
        line: usize,
        /// Offending line text.
        text: String,
    },
    /// The same key appears twice.
    #[error("line {line} repeats key `{key}`")]
    DuplicateKey {
        /// 1-based line number within the document.
        line: usize,
        /// Repeated key.
        key: String,
    },
}

impl From<MalformedHeaderKind> for MalformedHeaderError {
    fn from(kind: MalformedHeaderKind) -> Self {
        Self { kind }
    }
}
