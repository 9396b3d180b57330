//! On-disk documents and corpus discovery.

use crate::error::{IntegrityError, IntegrityResult};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

pub const DOCUMENT_SUFFIX: &str = ".md";

/// A document as read from disk for one validation pass.
#[derive(Clone, Debug)]
pub struct Document {
    pub path: PathBuf,
    /// Path relative to the docs root, forward slashes. Unique within a corpus.
    pub rel_path: String,
    pub text: String,
    /// Filesystem modification time. Informational only; never compared to `last_reviewed`.
    pub modified: Option<SystemTime>,
}

impl Document {
    /// Read `path` fresh from disk.
    pub fn read(path: &Path, docs_root: &Path) -> IntegrityResult<Self> {
        let text = fs::read_to_string(path).map_err(|err| IntegrityError::io(path, err))?;
        let modified = fs::metadata(path).and_then(|m| m.modified()).ok();
        Ok(Self {
            path: path.to_path_buf(),
            rel_path: display_path(docs_root, path),
            text,
            modified,
        })
    }
}

/// All `*.md` files under `root`, sorted by path.
pub fn collect_documents(root: &Path) -> IntegrityResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    if !root.is_dir() {
        return Err(IntegrityError::CorpusRootMissing(root.to_path_buf()));
    }
    collect_documents_inner(root, &mut out)?;
    out.sort();
    Ok(out)
}

fn collect_documents_inner(dir: &Path, out: &mut Vec<PathBuf>) -> IntegrityResult<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|err| IntegrityError::io(dir, err))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| IntegrityError::io(dir, err))?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_documents_inner(&path, out)?;
        } else if path.is_file() && path.to_string_lossy().ends_with(DOCUMENT_SUFFIX) {
            out.push(path);
        }
    }

    Ok(())
}

/// Report path for `path`: relative to `docs_root` when inside it, otherwise the file name.
pub fn display_path(docs_root: &Path, path: &Path) -> String {
    let root = normalize_path(docs_root);
    let normalized = normalize_path(path);
    match normalized.strip_prefix(&root) {
        Ok(rel) => rel_posix(rel),
        Err(_) => normalized
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| rel_posix(&normalized)),
    }
}

fn rel_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Lexical normalisation; does not touch the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => {
                has_root = true;
                out.push(Path::new("/"));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else if !has_root {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }

    out
}
