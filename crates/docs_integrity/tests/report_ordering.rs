mod common;

use docs_integrity::{Action, CheckKind, EngineConfig, Report, RuleCode, Violation};
use proptest::prelude::*;

fn violation_pool() -> Vec<Violation> {
    vec![
        Violation::error("b.md", RuleCode::BrokenLink, "broken link to `x.md`").at_line(7),
        Violation::error("a.md", RuleCode::StaleReview, "last reviewed 2025-01-01"),
        Violation::error("a.md", RuleCode::MissingField("owner".into()), "missing owner"),
        Violation::warning("c.md", RuleCode::UnrecognizedField("tags".into()), "unused key"),
        Violation::error("b.md", RuleCode::DuplicateId, "identifier `X` is claimed by 2 documents"),
        Violation::error("b.md", RuleCode::BrokenLink, "broken link to `y.md`").at_line(3),
    ]
}

proptest! {
    #[test]
    fn rendering_ignores_discovery_order(order in Just(violation_pool()).prop_shuffle()) {
        let config = EngineConfig::new("docs", common::today());
        let baseline = Report::new(
            CheckKind::Corpus,
            "docs",
            &config,
            violation_pool(),
            None,
            Action::Reject,
        );
        let shuffled = Report::new(CheckKind::Corpus, "docs", &config, order, None, Action::Reject);
        prop_assert_eq!(baseline.render(), shuffled.render());
    }
}
