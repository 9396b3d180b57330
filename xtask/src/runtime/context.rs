//! Shared command context passed into command families.

use crate::runtime::artifacts::ArtifactManager;
use crate::runtime::error::{XtaskError, XtaskResult};
use docs_integrity::{EngineConfig, LoadOptions};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Shared execution context for xtask command families.
#[derive(Clone, Debug)]
pub struct CommandContext {
    root: PathBuf,
    artifacts: ArtifactManager,
    load_options: LoadOptions,
    /// Values consulted before the process environment (`DOCS_TODAY`, ...).
    env_overrides: BTreeMap<String, String>,
}

impl CommandContext {
    /// Create a new command context rooted at the current workspace.
    pub fn new(load_options: LoadOptions) -> XtaskResult<Self> {
        Ok(Self::with_root(workspace_root()?, load_options))
    }

    /// Create a context rooted at an explicit workspace directory.
    pub fn with_root(root: PathBuf, load_options: LoadOptions) -> Self {
        let artifacts = ArtifactManager::new(root.clone());
        Self {
            root,
            artifacts,
            load_options,
            env_overrides: BTreeMap::new(),
        }
    }

    /// Pin an environment value for this context only.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_overrides.insert(key.into(), value.into());
        self
    }

    /// Shared artifact manager.
    pub fn artifacts(&self) -> &ArtifactManager {
        &self.artifacts
    }

    /// Resolve engine configuration for one invocation.
    ///
    /// Each call re-reads the config file and environment, so long-running wrappers pick up a
    /// new reference date on every tick while one-shot commands resolve it exactly once.
    pub fn engine_config(&self) -> XtaskResult<EngineConfig> {
        let config = EngineConfig::load_with_env(&self.root, &self.load_options, |key| {
            self.env_overrides
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
        })?;
        Ok(config)
    }
}

fn workspace_root() -> XtaskResult<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| XtaskError::config("xtask lives under workspace root"))
}
