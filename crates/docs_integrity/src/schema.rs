//! Per-document header rules.

use crate::config::{parse_iso_date, EngineConfig};
use crate::header::Header;
use crate::verdict::{RuleCode, Verdict};
use chrono::NaiveDate;

/// A recognised header key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HeaderField {
    pub name: &'static str,
    /// Must be present and non-blank on approved documents.
    pub required_when_approved: bool,
}

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_VALUES: &[&str] = &[STATUS_DRAFT, STATUS_APPROVED];

/// Header schema, in the order required fields are reported.
pub const HEADER_FIELDS: &[HeaderField] = &[
    HeaderField {
        name: "title",
        required_when_approved: true,
    },
    HeaderField {
        name: "owner",
        required_when_approved: true,
    },
    HeaderField {
        name: "status",
        required_when_approved: true,
    },
    HeaderField {
        name: "last_reviewed",
        required_when_approved: true,
    },
    HeaderField {
        name: "slug",
        required_when_approved: false,
    },
];

/// Document lifecycle state as declared in the header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Draft,
    Approved,
}

impl Status {
    /// Exact, case-sensitive match against the enumerated values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            STATUS_DRAFT => Some(Status::Draft),
            STATUS_APPROVED => Some(Status::Approved),
            _ => None,
        }
    }

    pub fn of(header: &Header) -> Option<Self> {
        header.get("status").and_then(Self::parse)
    }
}

/// Run every header rule against `header`, appending violations to `verdict`.
///
/// Only approved documents carry completeness and freshness obligations. Other documents are
/// checked for well-formed `status` and `last_reviewed` values when those are present.
pub fn check_header(header: &Header, config: &EngineConfig, verdict: &mut Verdict) {
    let approved = Status::of(header) == Some(Status::Approved);

    if approved {
        for field in HEADER_FIELDS.iter().filter(|f| f.required_when_approved) {
            if header.non_blank(field.name).is_none() {
                verdict.push_error(
                    RuleCode::MissingField(field.name.to_string()),
                    format!("missing required field `{}` for approved document", field.name),
                );
            }
        }
    }

    if let Some(status) = header.get("status") {
        if Status::parse(status).is_none() {
            verdict.push_error(
                RuleCode::InvalidStatus,
                format!("`status` must be one of {STATUS_VALUES:?}, found `{status}`"),
            );
        }
    }

    if approved {
        if let Some(owner) = header.non_blank("owner") {
            check_owner(owner, config, verdict);
        }
    }

    if let Some(raw) = header.non_blank("last_reviewed") {
        match parse_iso_date(raw) {
            None => verdict.push_error(
                RuleCode::InvalidDate,
                format!("`last_reviewed` value `{raw}` is not a YYYY-MM-DD date"),
            ),
            Some(reviewed) if approved => {
                let age_days = review_age_days(reviewed, config.today);
                if age_days > config.freshness_days {
                    verdict.push_error(
                        RuleCode::StaleReview,
                        format!(
                            "last reviewed {raw} ({age_days} days ago > {} days)",
                            config.freshness_days
                        ),
                    );
                }
            }
            Some(_) => {}
        }
    }

    for (key, _) in header.iter() {
        if !HEADER_FIELDS.iter().any(|f| f.name == key) {
            verdict.push_warning(
                RuleCode::UnrecognizedField(key.to_string()),
                format!("header key `{key}` is not part of the document schema"),
            );
        }
    }
}

fn check_owner(owner: &str, config: &EngineConfig, verdict: &mut Verdict) {
    if config.is_placeholder_owner(owner) {
        verdict.push_error(
            RuleCode::InvalidOwner,
            format!("owner `{owner}` is a placeholder; assign a real person or team"),
        );
        return;
    }
    if let Some(roster) = &config.owners {
        if !roster.contains(owner) {
            verdict.push_error(
                RuleCode::InvalidOwner,
                format!("owner `{owner}` is not in the owner roster"),
            );
        }
    }
}

/// Whole days between a review date and the reference date.
pub fn review_age_days(reviewed: NaiveDate, today: NaiveDate) -> i64 {
    (today - reviewed).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Severity;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 23).expect("date")
    }

    fn run(fields: &[(&str, &str)], config: &EngineConfig) -> Verdict {
        let header: Header = fields.iter().copied().collect();
        let mut verdict = Verdict::new("doc.md");
        check_header(&header, config, &mut verdict);
        verdict
    }

    fn codes(verdict: &Verdict) -> Vec<String> {
        verdict.violations.iter().map(|v| v.code.to_string()).collect()
    }

    #[test]
    fn approved_document_with_all_fields_passes() {
        let config = EngineConfig::new("docs", today());
        let verdict = run(
            &[
                ("title", "Valid Document"),
                ("owner", "platform-team"),
                ("status", "approved"),
                ("last_reviewed", "2026-02-23"),
            ],
            &config,
        );
        assert!(verdict.violations.is_empty(), "{verdict:#?}");
    }

    #[test]
    fn missing_fields_are_reported_in_schema_order() {
        let config = EngineConfig::new("docs", today());
        let verdict = run(&[("status", "approved"), ("title", "  ")], &config);
        assert_eq!(
            codes(&verdict),
            vec![
                "MISSING_FIELD:title",
                "MISSING_FIELD:owner",
                "MISSING_FIELD:last_reviewed"
            ]
        );
    }

    #[test]
    fn draft_may_omit_owner_and_review_date() {
        let config = EngineConfig::new("docs", today()).with_owners(["platform-team"]);
        let verdict = run(&[("title", "Sketch"), ("status", "draft")], &config);
        assert!(verdict.violations.is_empty());
        let verdict = run(&[("title", "Sketch"), ("status", "draft"), ("owner", "TBD")], &config);
        assert!(verdict.violations.is_empty());
    }

    #[test]
    fn draft_with_garbage_date_is_still_flagged() {
        let config = EngineConfig::new("docs", today());
        let verdict = run(&[("status", "draft"), ("last_reviewed", "soon")], &config);
        assert_eq!(codes(&verdict), vec!["INVALID_DATE"]);
    }

    #[test]
    fn unknown_status_is_invalid() {
        let config = EngineConfig::new("docs", today());
        assert_eq!(codes(&run(&[("status", "published")], &config)), vec!["INVALID_STATUS"]);
        assert_eq!(codes(&run(&[("status", "Approved")], &config)), vec!["INVALID_STATUS"]);
    }

    #[test]
    fn placeholder_and_unlisted_owners_are_rejected() {
        let base = [
            ("title", "Doc"),
            ("status", "approved"),
            ("last_reviewed", "2026-02-01"),
        ];
        let config = EngineConfig::new("docs", today()).with_owners(["platform-team"]);

        let mut fields = base.to_vec();
        fields.push(("owner", "tbd"));
        assert_eq!(codes(&run(&fields, &config)), vec!["INVALID_OWNER"]);

        let mut fields = base.to_vec();
        fields.push(("owner", "ghost-team"));
        let verdict = run(&fields, &config);
        assert_eq!(codes(&verdict), vec!["INVALID_OWNER"]);
        assert!(verdict.violations[0].message.contains("roster"));
    }

    #[test]
    fn freshness_boundary_is_inclusive_at_the_window() {
        let config = EngineConfig::new("docs", today());
        let at = |date: NaiveDate| {
            run(
                &[
                    ("title", "Doc"),
                    ("owner", "platform-team"),
                    ("status", "approved"),
                    ("last_reviewed", date.format("%Y-%m-%d").to_string().as_str()),
                ],
                &config,
            )
        };
        let ninety = today() - chrono::Duration::days(90);
        let ninety_one = today() - chrono::Duration::days(91);
        assert!(at(ninety).violations.is_empty());
        assert_eq!(codes(&at(ninety_one)), vec!["STALE_REVIEW"]);
    }

    #[test]
    fn unrecognized_keys_only_warn() {
        let config = EngineConfig::new("docs", today());
        let verdict = run(&[("status", "draft"), ("tags", "api")], &config);
        assert_eq!(codes(&verdict), vec!["UNRECOGNIZED_FIELD:tags"]);
        assert_eq!(verdict.violations[0].severity, Severity::Warning);
        assert!(verdict.is_valid());
    }
}
