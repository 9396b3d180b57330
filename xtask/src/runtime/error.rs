//! Structured xtask error types.

use docs_integrity::IntegrityError;
use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Stable error categories for xtask workflows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum XtaskErrorCategory {
    /// Invalid or unreadable configuration.
    Config,
    /// A docs check rejected its target, or the request itself was invalid.
    Validation,
    /// Filesystem or general I/O failure.
    Io,
}

/// Structured xtask error with contextual metadata.
///
/// The formatted display output is CLI-friendly. Optional `operation`, `target`, and `hint`
/// fields can be attached as the error propagates so failures remain actionable at the point they
/// are shown to the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XtaskError {
    /// High-level error category.
    pub category: XtaskErrorCategory,
    /// Human-readable message.
    pub message: String,
    /// Optional operation name.
    pub operation: Option<String>,
    /// Optional path target.
    pub target: Option<String>,
    /// Optional remediation hint.
    pub hint: Option<String>,
}

/// Convenience result type for xtask internals.
pub type XtaskResult<T> = Result<T, XtaskError>;

impl XtaskError {
    /// Create an error with the given category and message.
    pub fn new(category: XtaskErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            operation: None,
            target: None,
            hint: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Config, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Validation, message)
    }

    /// Create an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Io, message)
    }

    /// Attach an operation label.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach a target path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for XtaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(operation) = &self.operation {
            write!(f, " [operation: {operation}]")?;
        }
        if let Some(target) = &self.target {
            write!(f, " [target: {target}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " [hint: {hint}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for XtaskError {}

impl From<IntegrityError> for XtaskError {
    fn from(value: IntegrityError) -> Self {
        match &value {
            IntegrityError::Config { .. } => XtaskError::config(value.to_string())
                .with_hint("see tools/docs/integrity.toml and DOCS_TODAY / DOCS_STALE_REVIEW_DAYS"),
            IntegrityError::Io { path, .. } => {
                let path = path.clone();
                XtaskError::io(value.to_string()).with_path(&path)
            }
            IntegrityError::CorpusRootMissing(path) => {
                let path = path.clone();
                XtaskError::config(value.to_string())
                    .with_path(&path)
                    .with_hint("set `docs_root` in tools/docs/integrity.toml")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn display_includes_attached_context() {
        let err = XtaskError::validation("docs check rejected 1 document")
            .with_operation("docs check")
            .with_hint("fix the listed violations");
        assert_eq!(
            err.to_string(),
            "docs check rejected 1 document [operation: docs check] [hint: fix the listed violations]"
        );
    }

    #[test]
    fn missing_root_maps_to_config_error() {
        let err = XtaskError::from(IntegrityError::CorpusRootMissing(PathBuf::from("/x/docs")));
        assert_eq!(err.category, XtaskErrorCategory::Config);
        assert_eq!(err.target.as_deref(), Some("/x/docs"));
    }
}
