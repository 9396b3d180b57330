#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use docs_integrity::EngineConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 23).expect("valid date")
}

pub fn days_ago(days: i64) -> String {
    (today() - Duration::days(days)).format("%Y-%m-%d").to_string()
}

/// Temporary docs tree plus a config rooted at it.
pub struct Corpus {
    dir: TempDir,
}

impl Corpus {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        fs::create_dir_all(dir.path().join("docs")).expect("create docs root");
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("docs")
    }

    pub fn write(&self, rel: &str, text: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, text).expect("write document");
        path
    }

    pub fn config(&self) -> EngineConfig {
        EngineConfig::new(self.root(), today())
    }

    pub fn workspace(&self) -> &Path {
        self.dir.path()
    }
}

pub fn approved(title: &str, owner: &str, last_reviewed: &str) -> String {
    format!(
        "---\ntitle: {title}\nowner: {owner}\nstatus: approved\nlast_reviewed: {last_reviewed}\n---\n\n# {title}\n"
    )
}

pub fn draft(title: &str) -> String {
    format!("---\ntitle: {title}\nstatus: draft\n---\n\n# {title}\n")
}
