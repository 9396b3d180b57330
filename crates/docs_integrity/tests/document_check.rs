mod common;

use common::{approved, days_ago, draft, Corpus};
use docs_integrity::{
    validate, Action, IntegrityError, Mode, ModeConfig, ModeSource, RuleCode, Target,
};
use pretty_assertions::assert_eq;

fn codes(outcome: &docs_integrity::Outcome) -> Vec<String> {
    outcome
        .report
        .violations
        .iter()
        .map(|v| v.code.to_string())
        .collect()
}

#[test]
fn fresh_approved_document_is_accepted() {
    let corpus = Corpus::new();
    let path = corpus.write("api/orders.md", &approved("Order API", "platform-team", &days_ago(1)));

    let outcome = validate(&Target::Document(path), &corpus.config()).expect("validate");
    assert_eq!(outcome.action, Action::Accept);
    assert!(outcome.report.violations.is_empty());
    assert_eq!(outcome.report.target, "api/orders.md");
}

#[test]
fn review_older_than_window_is_rejected_as_stale() {
    let corpus = Corpus::new();
    let path = corpus.write("api/orders.md", &approved("Order API", "platform-team", &days_ago(95)));

    let outcome = validate(&Target::Document(path), &corpus.config()).expect("validate");
    assert_eq!(outcome.action, Action::Reject);
    assert_eq!(codes(&outcome), vec!["STALE_REVIEW"]);
}

#[test]
fn freshness_window_edges() {
    let corpus = Corpus::new();
    let at_limit = corpus.write("limit.md", &approved("Limit", "platform-team", &days_ago(90)));
    let past_limit = corpus.write("past.md", &approved("Past", "platform-team", &days_ago(91)));

    let config = corpus.config();
    assert_eq!(
        validate(&Target::Document(at_limit), &config).expect("validate").action,
        Action::Accept
    );
    let outcome = validate(&Target::Document(past_limit), &config).expect("validate");
    assert_eq!(outcome.action, Action::Reject);
    assert_eq!(codes(&outcome), vec!["STALE_REVIEW"]);
}

#[test]
fn each_missing_required_field_is_named() {
    let corpus = Corpus::new();
    let config = corpus.config();
    let full = [
        ("title", "Order API".to_string()),
        ("owner", "platform-team".to_string()),
        ("last_reviewed", days_ago(3)),
    ];

    for (skipped, _) in &full {
        let mut text = String::from("---\nstatus: approved\n");
        for (key, value) in full.iter().filter(|(k, _)| k != skipped) {
            text.push_str(&format!("{key}: {value}\n"));
        }
        text.push_str("---\nbody\n");
        let path = corpus.write(&format!("missing-{skipped}.md"), &text);

        let outcome = validate(&Target::Document(path), &config).expect("validate");
        assert_eq!(outcome.action, Action::Reject, "{skipped}");
        assert_eq!(codes(&outcome), vec![format!("MISSING_FIELD:{skipped}")]);
    }
}

#[test]
fn drafts_need_no_owner_or_review_date() {
    let corpus = Corpus::new();
    let path = corpus.write("sketch.md", &draft("Sketch"));
    let outcome = validate(&Target::Document(path), &corpus.config()).expect("validate");
    assert_eq!(outcome.action, Action::Accept);
}

#[test]
fn advisory_mode_downgrades_reject_to_warn() {
    let corpus = Corpus::new();
    let path = corpus.write("stale.md", &approved("Stale", "platform-team", &days_ago(200)));

    let strict = validate(&Target::Document(path.clone()), &corpus.config()).expect("validate");
    let advisory_config = corpus
        .config()
        .with_mode(ModeConfig::overridden(Mode::Advisory, ModeSource::CommandLine));
    let advisory = validate(&Target::Document(path), &advisory_config).expect("validate");

    assert_eq!(strict.action, Action::Reject);
    assert_eq!(advisory.action, Action::Warn);
    assert_eq!(strict.report.violations, advisory.report.violations);
    assert!(advisory.report.render().contains("mode: advisory (command line)"));
}

#[test]
fn malformed_header_is_reported_not_raised() {
    let corpus = Corpus::new();
    let path = corpus.write("broken.md", "---\ntitle: Broken\n");
    let outcome = validate(&Target::Document(path), &corpus.config()).expect("validate");
    assert_eq!(outcome.action, Action::Reject);
    assert_eq!(outcome.report.violations[0].code, RuleCode::MalformedHeader);
}

#[test]
fn unreadable_single_document_is_fatal() {
    let corpus = Corpus::new();
    let err = validate(
        &Target::Document(corpus.root().join("missing.md")),
        &corpus.config(),
    )
    .unwrap_err();
    assert!(matches!(err, IntegrityError::Io { .. }));
}

#[test]
fn repeated_runs_render_identical_reports() {
    let corpus = Corpus::new();
    let path = corpus.write(
        "mixed.md",
        "---\ntitle: Mixed\nowner: TBD\nstatus: approved\nlast_reviewed: 2020-01-01\ntags: x\n---\n",
    );
    let config = corpus.config();
    let first = validate(&Target::Document(path.clone()), &config).expect("validate");
    let second = validate(&Target::Document(path), &config).expect("validate");
    assert_eq!(first.report.render(), second.report.render());
    assert_eq!(
        codes(&first),
        vec!["INVALID_OWNER", "STALE_REVIEW", "UNRECOGNIZED_FIELD:tags"]
    );
}

#[test]
fn validation_never_modifies_the_document() {
    let corpus = Corpus::new();
    let text = approved("Old", "platform-team", "2019-06-01");
    let path = corpus.write("old.md", &text);
    let _ = validate(&Target::Document(path.clone()), &corpus.config()).expect("validate");
    assert_eq!(std::fs::read_to_string(path).expect("read"), text);
}
