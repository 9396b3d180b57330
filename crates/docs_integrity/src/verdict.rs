//! Violations and per-document verdicts.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// How a violation affects the final action.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks under strict mode.
    Error,
    /// Never blocks.
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Stable rule identifiers.
///
/// The rendered form (`MISSING_FIELD:owner`, `STALE_REVIEW`, ...) is part of the report contract
/// and is what downstream automation matches on.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum RuleCode {
    MissingField(String),
    InvalidStatus,
    InvalidOwner,
    StaleReview,
    InvalidDate,
    UnrecognizedField(String),
    MalformedHeader,
    Unreadable,
    DuplicateId,
    BrokenLink,
    UnknownOwner,
}

impl Display for RuleCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RuleCode::MissingField(field) => write!(f, "MISSING_FIELD:{field}"),
            RuleCode::InvalidStatus => f.write_str("INVALID_STATUS"),
            RuleCode::InvalidOwner => f.write_str("INVALID_OWNER"),
            RuleCode::StaleReview => f.write_str("STALE_REVIEW"),
            RuleCode::InvalidDate => f.write_str("INVALID_DATE"),
            RuleCode::UnrecognizedField(field) => write!(f, "UNRECOGNIZED_FIELD:{field}"),
            RuleCode::MalformedHeader => f.write_str("MALFORMED_HEADER"),
            RuleCode::Unreadable => f.write_str("UNREADABLE"),
            RuleCode::DuplicateId => f.write_str("DUPLICATE_ID"),
            RuleCode::BrokenLink => f.write_str("BROKEN_LINK"),
            RuleCode::UnknownOwner => f.write_str("UNKNOWN_OWNER"),
        }
    }
}

impl Serialize for RuleCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single rule failure scoped to one document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Violation {
    /// Corpus-relative document path (forward slashes).
    pub path: String,
    /// 1-based source line, when the rule can point at one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub code: RuleCode,
    pub message: String,
    pub severity: Severity,
}

impl Violation {
    pub fn error(path: impl Into<String>, code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: None,
            code,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(path: impl Into<String>, code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(path, code, message)
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Report ordering: path, then rule code, then line and message as tie breakers.
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.path
            .cmp(&other.path)
            .then_with(|| self.code.to_string().cmp(&other.code.to_string()))
            .then_with(|| self.line.unwrap_or(0).cmp(&other.line.unwrap_or(0)))
            .then_with(|| self.message.cmp(&other.message))
            .then_with(|| self.severity.cmp(&other.severity))
    }
}

/// Outcome of validating one document. An empty violation list is a pass.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Verdict {
    pub path: String,
    pub violations: Vec<Violation>,
}

impl Verdict {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            violations: Vec::new(),
        }
    }

    pub fn push_error(&mut self, code: RuleCode, message: impl Into<String>) {
        self.violations
            .push(Violation::error(self.path.clone(), code, message));
    }

    pub fn push_warning(&mut self, code: RuleCode, message: impl Into<String>) {
        self.violations
            .push(Violation::warning(self.path.clone(), code, message));
    }

    pub fn has(&self, code: &RuleCode) -> bool {
        self.violations.iter().any(|v| &v.code == code)
    }

    /// True when nothing would block under strict mode.
    pub fn is_valid(&self) -> bool {
        !self.violations.iter().any(Violation::is_error)
    }
}
