//! Deterministic rendering of verdicts and corpus results.
//!
//! A [`Report`] sorts its violations on construction, so the rendered text depends only on the
//! set of violations and never on the order in which checks discovered them. Nothing
//! time-varying is rendered besides the configured reference date.

use crate::config::{EngineConfig, Mode};
use crate::integrity::CorpusStats;
use crate::policy::Action;
use crate::verdict::{Severity, Violation};
use serde::Serialize;
use std::fmt::{self, Display, Formatter, Write as _};

/// Which entry point produced the report.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Document,
    Corpus,
}

impl Display for CheckKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckKind::Document => "document",
            CheckKind::Corpus => "corpus",
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Report {
    pub kind: CheckKind,
    /// Document path, or the docs root for corpus runs.
    pub target: String,
    pub mode: Mode,
    pub mode_source: String,
    pub reference_date: String,
    pub freshness_days: i64,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CorpusStats>,
    pub action: Action,
}

impl Report {
    pub fn new(
        kind: CheckKind,
        target: impl Into<String>,
        config: &EngineConfig,
        mut violations: Vec<Violation>,
        stats: Option<CorpusStats>,
        action: Action,
    ) -> Self {
        violations.sort_by(Violation::report_order);
        violations.dedup();
        Self {
            kind,
            target: target.into(),
            mode: config.mode.mode(),
            mode_source: config.mode.source().to_string(),
            reference_date: config.today.format("%Y-%m-%d").to_string(),
            freshness_days: config.freshness_days,
            violations,
            stats,
            action,
        }
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self).map(|body| format!("{body}\n"))
    }

    /// Plain-text rendering; identical to the `Display` output.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "docs integrity: {} {}", self.kind, self.target)?;
        writeln!(out, "mode: {} ({})", self.mode, self.mode_source)?;
        writeln!(
            out,
            "reference date: {} (freshness window {} days)",
            self.reference_date, self.freshness_days
        )?;
        writeln!(out)?;

        if self.violations.is_empty() {
            writeln!(out, "no violations")?;
        }
        for v in &self.violations {
            let loc = match v.line {
                Some(line) => format!("{}:{line}", v.path),
                None => v.path.clone(),
            };
            writeln!(out, "[{}] {loc} {} - {}", v.severity, v.code, v.message)?;
        }

        if let Some(stats) = &self.stats {
            writeln!(out)?;
            writeln!(out, "statistics:")?;
            writeln!(out, "  documents: {}", stats.total)?;
            writeln!(out, "  approved: {} ({})", stats.approved, stats.approval_rate)?;
            writeln!(out, "  draft: {}", stats.draft)?;
            writeln!(out, "  other: {}", stats.other)?;
            writeln!(out, "  stale: {}", stats.stale)?;
            if !stats.owners.is_empty() {
                writeln!(out, "  owners:")?;
                for (owner, count) in &stats.owners {
                    writeln!(out, "    {owner}: {count}")?;
                }
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "summary: {} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(out, "action: {}", self.action)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
