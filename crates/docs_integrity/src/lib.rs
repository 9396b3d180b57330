//! Metadata and cross-document integrity checks for the docs corpus.
//!
//! Documents are Markdown pages opening with a `---` delimited header of `key: value` lines.
//! Approved documents must carry a complete, fresh header; the corpus as a whole must have unique
//! identifiers, resolvable intra-corpus links, and owners drawn from the configured roster.
//!
//! [`validate`] is the only entry point wrappers should call. Editor hooks, the file watcher,
//! and CI all go through it so they observe identical verdicts for identical inputs. The engine
//! is read-only: it reports violations and never rewrites a document.

pub mod adapter;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod header;
pub mod integrity;
pub mod links;
pub mod policy;
pub mod report;
pub mod schema;
pub mod validator;
pub mod verdict;

pub use adapter::{validate, Outcome, Target};
pub use config::{EngineConfig, LoadOptions, Mode, ModeConfig, ModeSource};
pub use error::{IntegrityError, IntegrityResult, MalformedHeaderError};
pub use policy::Action;
pub use report::{CheckKind, Report};
pub use verdict::{RuleCode, Severity, Verdict, Violation};
