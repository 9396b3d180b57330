//! Artifact path management for xtask workflows.

use crate::runtime::error::{XtaskError, XtaskResult};
use std::fs;
use std::path::{Path, PathBuf};

const DOCS_AUDIT_REPORT: &str = ".artifacts/docs-audit.json";

/// Central artifact path policy for xtask.
///
/// Keeps workspace-relative output locations consistent across commands instead of ad hoc joins
/// from the workspace root.
#[derive(Clone, Debug)]
pub struct ArtifactManager {
    root: PathBuf,
}

impl ArtifactManager {
    /// Create an artifact manager rooted at the workspace.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve a possibly-relative workspace path.
    ///
    /// Absolute paths are preserved, while relative paths are anchored to the workspace root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Return the standard docs audit report location.
    pub fn docs_audit_report(&self) -> PathBuf {
        self.root.join(DOCS_AUDIT_REPORT)
    }

    /// Write `body` to `path`, creating parent directories as needed.
    pub fn write_text(&self, path: &Path, body: &str) -> XtaskResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                XtaskError::io(format!("failed to create {}: {err}", parent.display()))
            })?;
        }
        fs::write(path, body)
            .map_err(|err| XtaskError::io(format!("failed to write {}: {err}", path.display())))
    }
}
