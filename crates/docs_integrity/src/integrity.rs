//! Corpus-wide integrity analysis.
//!
//! [`CorpusIndex`] is built once from the scan snapshot and is read-only afterwards. All checks
//! here are single-threaded passes over that index.

use crate::config::EngineConfig;
use crate::corpus::ScannedDocument;
use crate::links::{extract_links, resolve_path_link, LinkKind, LinkRef, LinkTarget};
use crate::schema::Status;
use crate::verdict::{RuleCode, Violation};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Header field an identifier was taken from. Titles and slugs are separate namespaces.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum IdentifierField {
    Title,
    Slug,
}

impl IdentifierField {
    fn key(self) -> &'static str {
        match self {
            IdentifierField::Title => "title",
            IdentifierField::Slug => "slug",
        }
    }
}

/// What an outgoing reference landed on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// Corpus path of the referenced document.
    Document(String),
    Missing,
    /// `[[...]]` name carried by more than one document.
    Ambiguous(BTreeSet<String>),
}

/// One outgoing reference, resolved against the snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reference {
    pub link: LinkRef,
    /// Line in the source document.
    pub line: usize,
    pub resolved: Resolution,
}

/// Transient whole-corpus view.
#[derive(Clone, Debug, Default)]
pub struct CorpusIndex {
    paths: BTreeSet<String>,
    /// (field, value) → documents claiming it.
    identifiers: BTreeMap<(IdentifierField, String), BTreeSet<String>>,
    /// Source document → outgoing references.
    references: BTreeMap<String, Vec<Reference>>,
    /// Observed owner value → documents naming it.
    owners: BTreeMap<String, BTreeSet<String>>,
}

impl CorpusIndex {
    pub fn build(snapshot: &[ScannedDocument]) -> Self {
        let mut index = CorpusIndex {
            paths: snapshot.iter().map(|d| d.rel_path.clone()).collect(),
            ..CorpusIndex::default()
        };

        for doc in snapshot {
            let Some(parsed) = &doc.parsed else {
                continue;
            };
            for field in [IdentifierField::Title, IdentifierField::Slug] {
                if let Some(value) = parsed.header.non_blank(field.key()) {
                    index
                        .identifiers
                        .entry((field, value.to_string()))
                        .or_default()
                        .insert(doc.rel_path.clone());
                }
            }
            if let Some(owner) = parsed.header.non_blank("owner") {
                index
                    .owners
                    .entry(owner.to_string())
                    .or_default()
                    .insert(doc.rel_path.clone());
            }
        }

        for doc in snapshot {
            let Some(parsed) = &doc.parsed else {
                continue;
            };
            let refs = extract_links(&parsed.body)
                .into_iter()
                .filter_map(|link| {
                    let resolved = match link.kind {
                        LinkKind::Path => match resolve_path_link(&doc.rel_path, &link.target) {
                            LinkTarget::NotDocument | LinkTarget::OutsideCorpus => return None,
                            LinkTarget::Document(path) if index.paths.contains(&path) => {
                                Resolution::Document(path)
                            }
                            LinkTarget::Document(_) => Resolution::Missing,
                        },
                        LinkKind::Identifier => index.resolve_name(&link.target),
                    };
                    Some(Reference {
                        line: parsed.body_start_line + link.line - 1,
                        link,
                        resolved,
                    })
                })
                .collect::<Vec<_>>();
            if !refs.is_empty() {
                index.references.insert(doc.rel_path.clone(), refs);
            }
        }

        index
    }

    /// Resolve a `[[name]]` against every title and slug.
    fn resolve_name(&self, name: &str) -> Resolution {
        let mut docs: BTreeSet<String> = [IdentifierField::Title, IdentifierField::Slug]
            .into_iter()
            .filter_map(|field| self.identifiers.get(&(field, name.to_string())))
            .flatten()
            .cloned()
            .collect();
        match docs.len() {
            0 => Resolution::Missing,
            1 => docs.pop_first().map_or(Resolution::Missing, Resolution::Document),
            _ => Resolution::Ambiguous(docs),
        }
    }

    /// Titles and slugs claimed by more than one document.
    pub fn duplicate_groups(
        &self,
    ) -> impl Iterator<Item = (IdentifierField, &str, &BTreeSet<String>)> {
        self.identifiers
            .iter()
            .filter(|(_, docs)| docs.len() > 1)
            .map(|((field, value), docs)| (*field, value.as_str(), docs))
    }

    /// Edges of the reference graph that land on an existing document.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.references.iter().flat_map(|(source, refs)| {
            refs.iter().filter_map(move |r| match &r.resolved {
                Resolution::Document(target) => Some((source.as_str(), target.as_str())),
                Resolution::Missing | Resolution::Ambiguous(_) => None,
            })
        })
    }

    pub fn owners(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.owners
    }
}

/// Informational corpus statistics. Never turned into violations.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CorpusStats {
    pub total: usize,
    pub approved: usize,
    pub draft: usize,
    /// Missing or invalid status, or no parsable header.
    pub other: usize,
    /// Approved documents past the freshness window.
    pub stale: usize,
    pub approval_rate: String,
    /// Observed owner roster with document counts.
    pub owners: BTreeMap<String, usize>,
}

impl CorpusStats {
    fn collect(snapshot: &[ScannedDocument], index: &CorpusIndex) -> Self {
        let mut stats = CorpusStats {
            total: snapshot.len(),
            ..CorpusStats::default()
        };
        for doc in snapshot {
            match doc.parsed.as_ref().and_then(|p| Status::of(&p.header)) {
                Some(Status::Approved) => stats.approved += 1,
                Some(Status::Draft) => stats.draft += 1,
                None => stats.other += 1,
            }
            if doc.verdict.has(&RuleCode::StaleReview) {
                stats.stale += 1;
            }
        }
        stats.approval_rate = approval_rate(stats.approved, stats.total);
        stats.owners = index
            .owners
            .iter()
            .map(|(owner, docs)| (owner.clone(), docs.len()))
            .collect();
        stats
    }
}

fn approval_rate(approved: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", approved as f64 / total as f64 * 100.0)
}

/// Result of the corpus-wide checks.
#[derive(Clone, Debug)]
pub struct IntegrityAnalysis {
    pub index: CorpusIndex,
    pub violations: Vec<Violation>,
    pub stats: CorpusStats,
}

/// Build the index over a finished snapshot and run the cross-document checks.
pub fn analyze(snapshot: &[ScannedDocument], config: &EngineConfig) -> IntegrityAnalysis {
    let index = CorpusIndex::build(snapshot);
    let mut violations = Vec::new();

    for (field, value, docs) in index.duplicate_groups() {
        let listed = join(docs);
        for doc in docs {
            violations.push(Violation::error(
                doc.clone(),
                RuleCode::DuplicateId,
                format!(
                    "{} `{value}` is claimed by {} documents: {listed}",
                    field.key(),
                    docs.len()
                ),
            ));
        }
    }

    for (source, refs) in &index.references {
        for reference in refs {
            let target = &reference.link.target;
            let message = match (&reference.resolved, &reference.link.kind) {
                (Resolution::Document(_), _) => continue,
                (Resolution::Missing, LinkKind::Path) => {
                    format!("broken link to `{target}`: no such document in the corpus")
                }
                (Resolution::Missing, LinkKind::Identifier) => {
                    format!("broken reference `[[{target}]]`: no document has that title or slug")
                }
                (Resolution::Ambiguous(docs), _) => format!(
                    "ambiguous reference `[[{target}]]`: matches {}",
                    join(docs)
                ),
            };
            violations.push(
                Violation::error(source.clone(), RuleCode::BrokenLink, message)
                    .at_line(reference.line),
            );
        }
    }

    if let Some(roster) = &config.owners {
        violations.extend(unknown_owner_violations(snapshot, roster, config));
    }

    let stats = CorpusStats::collect(snapshot, &index);
    tracing::info!(
        documents = stats.total,
        duplicate_groups = index.duplicate_groups().count(),
        reference_edges = index.edges().count(),
        violations = violations.len(),
        "integrity analysis finished"
    );

    IntegrityAnalysis {
        index,
        violations,
        stats,
    }
}

fn join(docs: &BTreeSet<String>) -> String {
    docs.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Roster cross-check for documents the schema rules do not already judge.
///
/// Approved documents get `INVALID_OWNER` from the per-document rules, so only the rest of the
/// corpus is checked here.
fn unknown_owner_violations(
    snapshot: &[ScannedDocument],
    roster: &BTreeSet<String>,
    config: &EngineConfig,
) -> Vec<Violation> {
    snapshot
        .iter()
        .filter_map(|doc| {
            let header = &doc.parsed.as_ref()?.header;
            if Status::of(header) == Some(Status::Approved) {
                return None;
            }
            let owner = header.non_blank("owner")?;
            if config.is_placeholder_owner(owner) || roster.contains(owner) {
                return None;
            }
            Some(Violation::error(
                doc.rel_path.clone(),
                RuleCode::UnknownOwner,
                format!(
                    "owner `{owner}` is not in the owner roster ({})",
                    join(roster)
                ),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate_parsed;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn config() -> EngineConfig {
        EngineConfig::new("docs", NaiveDate::from_ymd_opt(2026, 2, 23).expect("date"))
    }

    fn snapshot(docs: &[(&str, &str)], config: &EngineConfig) -> Vec<ScannedDocument> {
        docs.iter()
            .map(|(path, text)| {
                let (parsed, verdict) = validate_parsed(path, text, config);
                ScannedDocument {
                    rel_path: path.to_string(),
                    parsed,
                    verdict,
                }
            })
            .collect()
    }

    fn codes_for(analysis: &IntegrityAnalysis, path: &str) -> Vec<String> {
        analysis
            .violations
            .iter()
            .filter(|v| v.path == path)
            .map(|v| v.code.to_string())
            .collect()
    }

    #[test]
    fn shared_title_forms_one_group_reported_on_each_member() {
        let config = config();
        let snap = snapshot(
            &[
                ("a.md", "---\ntitle: Order API\nstatus: draft\n---\n"),
                ("b/c.md", "---\ntitle: Order API\nstatus: draft\n---\n"),
                ("d.md", "---\ntitle: Billing\nstatus: draft\n---\n"),
            ],
            &config,
        );
        let analysis = analyze(&snap, &config);
        assert_eq!(analysis.index.duplicate_groups().count(), 1);
        assert_eq!(codes_for(&analysis, "a.md"), vec!["DUPLICATE_ID"]);
        assert_eq!(codes_for(&analysis, "b/c.md"), vec!["DUPLICATE_ID"]);
        assert!(codes_for(&analysis, "d.md").is_empty());
        assert!(analysis.violations[0].message.contains("a.md, b/c.md"));
    }

    #[test]
    fn shared_title_is_a_duplicate_even_when_one_side_has_a_slug() {
        let config = config();
        let snap = snapshot(
            &[
                ("a.md", "---\ntitle: Order API\nslug: orders-v1\nstatus: draft\n---\n"),
                ("b.md", "---\ntitle: Order API\nstatus: draft\n---\n"),
                ("c.md", "---\ntitle: Index\nstatus: draft\n---\nSee [[Order API]].\n"),
            ],
            &config,
        );
        let analysis = analyze(&snap, &config);
        assert_eq!(codes_for(&analysis, "a.md"), vec!["DUPLICATE_ID"]);
        assert_eq!(codes_for(&analysis, "b.md"), vec!["DUPLICATE_ID"]);
        assert!(analysis.violations[0].message.starts_with("title `Order API`"));

        let ambiguous: Vec<_> = analysis.violations.iter().filter(|v| v.path == "c.md").collect();
        assert_eq!(ambiguous.len(), 1);
        assert_eq!(ambiguous[0].code, RuleCode::BrokenLink);
        assert_eq!(ambiguous[0].line, Some(5));
        assert!(ambiguous[0].message.contains("ambiguous"));
        assert!(ambiguous[0].message.contains("a.md, b.md"));
    }

    #[test]
    fn distinct_slugs_and_titles_do_not_collide() {
        let config = config();
        let snap = snapshot(
            &[
                ("a.md", "---\ntitle: Orders\nslug: orders-overview\nstatus: draft\n---\n[[orders-overview]]\n"),
                ("b.md", "---\ntitle: Billing\nslug: billing-overview\nstatus: draft\n---\n[[Orders]]\n"),
            ],
            &config,
        );
        let analysis = analyze(&snap, &config);
        assert!(analysis.violations.is_empty(), "{:#?}", analysis.violations);
        assert_eq!(analysis.index.edges().count(), 2);
    }

    #[test]
    fn links_above_the_docs_root_are_not_corpus_references() {
        let config = config();
        let snap = snapshot(
            &[(
                "guide.md",
                "---\ntitle: Guide\nstatus: draft\n---\nSee [readme](../README.md).\n",
            )],
            &config,
        );
        let analysis = analyze(&snap, &config);
        assert!(analysis.violations.is_empty(), "{:#?}", analysis.violations);
        assert_eq!(analysis.index.edges().count(), 0);
    }

    #[test]
    fn broken_and_valid_links_are_told_apart() {
        let config = config();
        let snap = snapshot(
            &[
                (
                    "guides/setup.md",
                    "---\ntitle: Setup\nstatus: draft\n---\nSee [orders](../api/orders.md).\n\
                     See [gone](../api/gone.md) and [[Order API]] and [[Nope]].",
                ),
                ("api/orders.md", "---\ntitle: Order API\nstatus: draft\n---\n"),
            ],
            &config,
        );
        let analysis = analyze(&snap, &config);
        let broken: Vec<_> = analysis
            .violations
            .iter()
            .map(|v| (v.path.as_str(), v.line, v.message.contains("gone.md") || v.message.contains("Nope")))
            .collect();
        assert_eq!(
            broken,
            vec![("guides/setup.md", Some(6), true), ("guides/setup.md", Some(6), true)]
        );
        assert_eq!(
            analysis.index.edges().collect::<Vec<_>>(),
            vec![
                ("guides/setup.md", "api/orders.md"),
                ("guides/setup.md", "api/orders.md")
            ]
        );
    }

    #[test]
    fn roster_check_covers_non_approved_documents() {
        let config = config().with_owners(["platform-team"]);
        let snap = snapshot(
            &[
                ("a.md", "---\ntitle: A\nowner: ghost-team\nstatus: draft\n---\n"),
                ("b.md", "---\ntitle: B\nowner: platform-team\nstatus: draft\n---\n"),
                ("c.md", "---\ntitle: C\nowner: TBD\nstatus: draft\n---\n"),
            ],
            &config,
        );
        let analysis = analyze(&snap, &config);
        assert_eq!(codes_for(&analysis, "a.md"), vec!["UNKNOWN_OWNER"]);
        assert!(codes_for(&analysis, "b.md").is_empty());
        assert!(codes_for(&analysis, "c.md").is_empty());
    }

    #[test]
    fn statistics_count_statuses_and_staleness() {
        let config = config();
        let snap = snapshot(
            &[
                (
                    "fresh.md",
                    "---\ntitle: F\nowner: platform-team\nstatus: approved\nlast_reviewed: 2026-02-01\n---\n",
                ),
                (
                    "stale.md",
                    "---\ntitle: S\nowner: platform-team\nstatus: approved\nlast_reviewed: 2025-01-01\n---\n",
                ),
                ("draft.md", "---\ntitle: D\nstatus: draft\n---\n"),
                ("broken.md", "no header"),
            ],
            &config,
        );
        let stats = analyze(&snap, &config).stats;
        assert_eq!(stats.total, 4);
        assert_eq!(stats.approved, 2);
        assert_eq!(stats.draft, 1);
        assert_eq!(stats.other, 1);
        assert_eq!(stats.stale, 1);
        assert_eq!(stats.approval_rate, "50.0%");
        assert_eq!(stats.owners.get("platform-team"), Some(&2));
    }

    #[test]
    fn empty_corpus_has_zero_rate() {
        assert_eq!(approval_rate(0, 0), "0.0%");
        assert_eq!(approval_rate(1, 3), "33.3%");
    }
}
