//! Mapping from violations plus mode to the action a caller must take.

use crate::config::{Mode, ModeConfig};
use crate::verdict::Violation;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// What the invoking wrapper must do.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Accept,
    Warn,
    Reject,
}

impl Action {
    /// True when the wrapper must block the save, commit, or build.
    pub fn is_blocking(self) -> bool {
        self == Action::Reject
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Accept => "ACCEPT",
            Action::Warn => "WARN",
            Action::Reject => "REJECT",
        })
    }
}

/// Decide the action for a set of violations under the invocation's mode.
pub fn decide(mode: &ModeConfig, violations: &[Violation]) -> Action {
    if violations.is_empty() {
        return Action::Accept;
    }
    match mode.mode() {
        Mode::Strict if violations.iter().any(Violation::is_error) => Action::Reject,
        Mode::Strict | Mode::Advisory => Action::Warn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModeSource;
    use crate::verdict::RuleCode;

    fn error() -> Violation {
        Violation::error("a.md", RuleCode::StaleReview, "stale")
    }

    fn warning() -> Violation {
        Violation::warning("a.md", RuleCode::UnrecognizedField("tags".into()), "unused")
    }

    #[test]
    fn strict_is_the_default_and_rejects_errors() {
        let mode = ModeConfig::default();
        assert_eq!(decide(&mode, &[]), Action::Accept);
        assert_eq!(decide(&mode, &[error()]), Action::Reject);
        assert_eq!(decide(&mode, &[warning()]), Action::Warn);
        assert_eq!(decide(&mode, &[warning(), error()]), Action::Reject);
    }

    #[test]
    fn advisory_never_rejects() {
        let mode = ModeConfig::overridden(Mode::Advisory, ModeSource::CommandLine);
        assert_eq!(decide(&mode, &[]), Action::Accept);
        assert_eq!(decide(&mode, &[error()]), Action::Warn);
        assert_eq!(decide(&mode, &[warning()]), Action::Warn);
    }
}
