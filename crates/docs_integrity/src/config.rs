//! Invocation configuration.
//!
//! Configuration is resolved exactly once per invocation from three layers, lowest precedence
//! first: built-in defaults, the optional `tools/docs/integrity.toml` file, then environment and
//! command-line overrides. The resolved [`EngineConfig`] is only ever handed out by shared
//! reference, and [`ModeConfig`] exposes no mutators, so a run cannot change its own mode.

use crate::error::{IntegrityError, IntegrityResult};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Workspace-relative location of the optional config file.
pub const DEFAULT_CONFIG_PATH: &str = "tools/docs/integrity.toml";
pub const DEFAULT_DOCS_ROOT: &str = "docs";
pub const DEFAULT_FRESHNESS_DAYS: i64 = 90;
pub const DEFAULT_OWNER_PLACEHOLDERS: &[&str] = &["", "tbd", "unknown"];

const TODAY_ENV: &str = "DOCS_TODAY";
const FRESHNESS_ENV: &str = "DOCS_STALE_REVIEW_DAYS";

/// Blocking behaviour for error-severity violations.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Any error-severity violation rejects.
    #[default]
    Strict,
    /// Violations are reported but never reject.
    Advisory,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Strict => "strict",
            Mode::Advisory => "advisory",
        })
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "strict" => Ok(Mode::Strict),
            "advisory" => Ok(Mode::Advisory),
            other => Err(format!(
                "unsupported mode `{other}` (expected `strict` or `advisory`)"
            )),
        }
    }
}

/// Where the effective mode came from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ModeSource {
    #[default]
    Default,
    ConfigFile(PathBuf),
    CommandLine,
}

impl Display for ModeSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ModeSource::Default => f.write_str("default"),
            ModeSource::ConfigFile(path) => write!(f, "config file {}", path.display()),
            ModeSource::CommandLine => f.write_str("command line"),
        }
    }
}

/// The single process-wide mode flag, with its provenance.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ModeConfig {
    mode: Mode,
    source: ModeSource,
}

impl ModeConfig {
    /// Explicit override. The source is recorded and printed in every report.
    pub fn overridden(mode: Mode, source: ModeSource) -> Self {
        Self { mode, source }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn source(&self) -> &ModeSource {
        &self.source
    }

    pub fn is_default(&self) -> bool {
        self.source == ModeSource::Default
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    mode: Option<Mode>,
    owners: Option<Vec<String>>,
    owner_placeholders: Option<Vec<String>>,
    freshness_days: Option<i64>,
    docs_root: Option<PathBuf>,
}

/// Inputs that only the caller can supply.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Explicit config file, relative to the workspace root; must exist when given.
    pub config_path: Option<PathBuf>,
    /// Command-line mode override.
    pub mode_override: Option<Mode>,
}

/// Fully resolved configuration for one invocation.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub mode: ModeConfig,
    /// Valid owners. `None` disables roster checks.
    pub owners: Option<BTreeSet<String>>,
    /// Lowercased owner values that count as "not assigned".
    pub owner_placeholders: BTreeSet<String>,
    pub freshness_days: i64,
    /// Corpus root; violation paths are reported relative to it.
    pub docs_root: PathBuf,
    /// Reference "now" for freshness checks.
    pub today: NaiveDate,
}

impl EngineConfig {
    /// Defaults rooted at `docs_root` with an explicit reference date.
    pub fn new(docs_root: impl Into<PathBuf>, today: NaiveDate) -> Self {
        Self {
            mode: ModeConfig::default(),
            owners: None,
            owner_placeholders: DEFAULT_OWNER_PLACEHOLDERS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            freshness_days: DEFAULT_FRESHNESS_DAYS,
            docs_root: docs_root.into(),
            today,
        }
    }

    pub fn with_mode(mut self, mode: ModeConfig) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_owners<I, S>(mut self, owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.owners = Some(owners.into_iter().map(Into::into).collect());
        self
    }

    /// Resolve configuration for a workspace. `env` supplies the `DOCS_TODAY` and
    /// `DOCS_STALE_REVIEW_DAYS` overrides; callers normally pass a process-environment lookup.
    pub fn load_with_env(
        workspace_root: &Path,
        options: &LoadOptions,
        env: impl Fn(&str) -> Option<String>,
    ) -> IntegrityResult<Self> {
        let (file, file_path) = read_config_file(workspace_root, options.config_path.as_deref())?;

        let today = match env(TODAY_ENV) {
            Some(raw) => parse_iso_date(&raw).ok_or_else(|| {
                IntegrityError::config(
                    TODAY_ENV,
                    format!("invalid date `{raw}` (expected YYYY-MM-DD)"),
                )
            })?,
            None => Local::now().date_naive(),
        };

        let docs_root = workspace_root.join(
            file.docs_root
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS_ROOT)),
        );
        let mut config = Self::new(docs_root, today);

        if let Some(owners) = file.owners {
            config = config.with_owners(owners.into_iter().map(|o| o.trim().to_string()));
        }
        if let Some(placeholders) = file.owner_placeholders {
            config.owner_placeholders = placeholders
                .into_iter()
                .map(|p| p.trim().to_lowercase())
                .collect();
        }
        if let Some(days) = file.freshness_days {
            config.freshness_days = days;
        }
        if let Some(raw) = env(FRESHNESS_ENV) {
            config.freshness_days = raw.trim().parse::<i64>().map_err(|_| {
                IntegrityError::config(FRESHNESS_ENV, format!("invalid day count `{raw}`"))
            })?;
        }
        if config.freshness_days < 0 {
            return Err(IntegrityError::config(
                file_path.unwrap_or_else(|| PathBuf::from(FRESHNESS_ENV)),
                "freshness window must not be negative",
            ));
        }

        config.mode = match (options.mode_override, file.mode, file_path) {
            (Some(mode), _, _) => ModeConfig::overridden(mode, ModeSource::CommandLine),
            (None, Some(mode), Some(path)) => {
                ModeConfig::overridden(mode, ModeSource::ConfigFile(path))
            }
            _ => ModeConfig::default(),
        };

        Ok(config)
    }

    /// True when `owner` (any case, trimmed) is a placeholder rather than a real owner.
    pub fn is_placeholder_owner(&self, owner: &str) -> bool {
        self.owner_placeholders
            .contains(&owner.trim().to_lowercase())
    }
}

fn read_config_file(
    workspace_root: &Path,
    explicit: Option<&Path>,
) -> IntegrityResult<(ConfigFile, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) => workspace_root.join(path),
        None => {
            let path = workspace_root.join(DEFAULT_CONFIG_PATH);
            if !path.exists() {
                return Ok((ConfigFile::default(), None));
            }
            path
        }
    };
    let text = fs::read_to_string(&path).map_err(|err| IntegrityError::io(&path, err))?;
    let file = toml::from_str(&text)
        .map_err(|err| IntegrityError::config(&path, err.to_string()))?;
    Ok((file, Some(path)))
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
