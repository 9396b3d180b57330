//! Header block extraction.

use crate::error::{MalformedHeaderError, MalformedHeaderKind};
use std::collections::BTreeMap;

/// Boundary marker delimiting the header block from the body.
pub const HEADER_DELIM: &str = "---";

/// Parsed `key: value` header fields.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Header {
    fields: BTreeMap<String, String>,
}

impl Header {
    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value for `key` when present and not blank.
    pub fn non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Header {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Header plus the untouched remainder of the document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedDocument {
    pub header: Header,
    pub body: String,
    /// 1-based document line number of the first body line.
    pub body_start_line: usize,
}

/// Split raw document text into its header block and body.
///
/// Parsing is line-oriented: the first line must be the boundary marker, every following line up
/// to the next marker must be blank, a `#` comment, or a `key: value` pair. The body is returned
/// as-is and never interpreted here.
pub fn parse_header(text: &str) -> Result<ParsedDocument, MalformedHeaderError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.first().map(|l| l.trim()) != Some(HEADER_DELIM) {
        return Err(MalformedHeaderKind::MissingStart.into());
    }

    let end_idx = lines
        .iter()
        .enumerate()
        .skip(1)
        .find_map(|(i, line)| (line.trim() == HEADER_DELIM).then_some(i))
        .ok_or(MalformedHeaderKind::Unterminated)?;

    let mut fields = BTreeMap::new();
    for (idx, raw_line) in lines[1..end_idx].iter().enumerate() {
        let line_num = idx + 2;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = split_key_value(line) else {
            return Err(MalformedHeaderKind::UnrecognizedLine {
                line: line_num,
                text: line.to_string(),
            }
            .into());
        };
        if fields
            .insert(key.to_string(), strip_quotes(value).to_string())
            .is_some()
        {
            return Err(MalformedHeaderKind::DuplicateKey {
                line: line_num,
                key: key.to_string(),
            }
            .into());
        }
    }

    Ok(ParsedDocument {
        header: Header { fields },
        body: lines[end_idx + 1..].join("\n"),
        body_start_line: end_idx + 2,
    })
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim_end();
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return None;
    }
    Some((key, value.trim()))
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && ((bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\''))
    {
        return &value[1..value.len() - 1];
    }
    value
}
