//! Intra-corpus reference extraction from document bodies.

/// How a body refers to another document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LinkKind {
    /// Markdown `[label](path.md)` link.
    Path,
    /// `[[identifier]]` reference to a title or slug.
    Identifier,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinkRef {
    pub kind: LinkKind,
    pub target: String,
    /// 1-based line within the body.
    pub line: usize,
}

/// Where a path link points once resolved against its source document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LinkTarget {
    /// External, anchor-only, image, or non-document asset; not checked.
    NotDocument,
    /// Corpus-relative path of the referenced document.
    Document(String),
    /// Climbs above the docs root.
    OutsideCorpus,
}

/// Collect every path link and identifier reference outside fenced code blocks.
pub fn extract_links(body: &str) -> Vec<LinkRef> {
    let mut links = Vec::new();
    let mut in_fence = false;

    for (line_no, line) in body.lines().enumerate() {
        let line_no = line_no + 1;
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        for target in markdown_link_targets(line) {
            links.push(LinkRef {
                kind: LinkKind::Path,
                target,
                line: line_no,
            });
        }
        for target in identifier_targets(line) {
            links.push(LinkRef {
                kind: LinkKind::Identifier,
                target,
                line: line_no,
            });
        }
    }

    links
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

fn markdown_link_targets(line: &str) -> Vec<String> {
    let bytes = line.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'[' || (i > 0 && bytes[i - 1] == b'!') {
            i += 1;
            continue;
        }

        let Some(label_end) = find_byte(bytes, b']', i + 1) else {
            break;
        };
        if bytes.get(label_end + 1) != Some(&b'(') {
            i = label_end + 1;
            continue;
        }
        let Some(target_end) = find_byte(bytes, b')', label_end + 2) else {
            break;
        };

        let mut target = line[label_end + 2..target_end].trim();
        if target.starts_with('<') && target.ends_with('>') && target.len() >= 2 {
            target = &target[1..target.len() - 1];
        } else if let Some((before, _title)) = target.split_once(' ') {
            target = before;
        }
        out.push(target.to_string());
        i = target_end + 1;
    }

    out
}

fn identifier_targets(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find("[[") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("]]") else {
            break;
        };
        let inner = &after[..end];
        let id = inner.split_once('|').map_or(inner, |(id, _)| id).trim();
        if !id.is_empty() {
            out.push(id.to_string());
        }
        rest = &after[end + 2..];
    }
    out
}

fn find_byte(bytes: &[u8], needle: u8, start: usize) -> Option<usize> {
    bytes
        .get(start..)?
        .iter()
        .position(|b| *b == needle)
        .map(|pos| start + pos)
}

/// Resolve a path link written in document `from_rel` (corpus-relative).
///
/// Leading `/` anchors the target at the docs root; anything else is relative to the source
/// document's directory. Resolution is purely lexical so it agrees with the scanned snapshot
/// rather than whatever is on disk at the moment.
pub fn resolve_path_link(from_rel: &str, target: &str) -> LinkTarget {
    if target.is_empty()
        || target.starts_with('#')
        || target.starts_with('?')
        || target.starts_with("//")
        || has_uri_scheme(target)
    {
        return LinkTarget::NotDocument;
    }
    let path_part = target
        .split_once('#')
        .map_or(target, |(path, _anchor)| path);
    let path_part = path_part
        .split_once('?')
        .map_or(path_part, |(path, _query)| path);
    if !path_part.ends_with(".md") {
        return LinkTarget::NotDocument;
    }

    let mut segments: Vec<&str> = if path_part.starts_with('/') {
        Vec::new()
    } else {
        let mut base: Vec<&str> = from_rel.split('/').collect();
        base.pop();
        base
    };

    for segment in path_part.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return LinkTarget::OutsideCorpus;
                }
            }
            other => segments.push(other),
        }
    }

    LinkTarget::Document(segments.join("/"))
}

fn has_uri_scheme(target: &str) -> bool {
    let Some((scheme, _)) = target.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}
