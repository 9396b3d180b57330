//! Polling file watcher.
//!
//! Snapshots document modification times under the docs root and runs the per-document check
//! for every document that appeared or changed since the previous tick. Configuration is
//! resolved again on every tick.

use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;
use docs_integrity::document::collect_documents;
use docs_integrity::{validate, Target};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

type Snapshot = BTreeMap<PathBuf, Option<SystemTime>>;

pub(super) fn run(ctx: &CommandContext, interval: Duration) -> XtaskResult<()> {
    let docs_root = ctx.engine_config()?.docs_root;
    eprintln!(
        "Watching {} for changes (polling every {}ms). Press Ctrl+C to stop.",
        docs_root.display(),
        interval.as_millis()
    );

    let mut last = Snapshot::new();
    loop {
        let current = snapshot(&docs_root)?;
        let (changed, removed) = diff(&last, &current);
        for path in removed {
            tracing::info!(path = %path.display(), "document removed");
        }
        if !changed.is_empty() {
            let config = ctx.engine_config()?;
            for path in changed {
                match validate(&Target::Document(path.clone()), &config) {
                    Ok(outcome) => print!("{}", outcome.report),
                    Err(err) => tracing::warn!(path = %path.display(), error = %err, "check failed"),
                }
            }
        }
        last = current;
        thread::sleep(interval);
    }
}

fn snapshot(root: &Path) -> XtaskResult<Snapshot> {
    Ok(collect_documents(root)?
        .into_iter()
        .map(|path| {
            let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
            (path, modified)
        })
        .collect())
}

/// Paths created or modified since `previous`, and paths that disappeared.
fn diff(previous: &Snapshot, current: &Snapshot) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let changed = current
        .iter()
        .filter(|(path, modified)| previous.get(*path) != Some(*modified))
        .map(|(path, _)| path.clone())
        .collect();
    let removed = previous
        .keys()
        .filter(|path| !current.contains_key(*path))
        .cloned()
        .collect();
    (changed, removed)
}
