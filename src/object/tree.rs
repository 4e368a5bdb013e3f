use std::path;

use thiserror::Error;

use super::{parse_utils, Id, Kind};

/// Reasons why a tree payload can not be decoded.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseTreeError {
    /// An entry line does not have the shape `<kind> <id> <name>`
    /// or names a kind other than `blob` or `tree`.
    #[error("malformed tree entry `{0}`")]
    MalformedEntry(String),

    /// An entry name would escape its directory when joined onto a path.
    #[error("unsafe entry name `{0}`")]
    UnsafeName(String),
}

/// A single named child of a tree object.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    pub name: String,
    pub id: Id,
    pub kind: Kind,
}

impl TreeEntry {
    pub fn new<N: Into<String>>(name: N, id: Id, kind: Kind) -> TreeEntry {
        TreeEntry {
            name: name.into(),
            id,
            kind,
        }
    }
}

/// Returns true if `name` may be used as a single path segment.
///
/// Names are rejected if they are empty, `.` or `..`, or contain a path
/// separator for the host platform (`/` everywhere, and `\` on Windows).
pub fn is_safe_name(name: &str) -> bool {
    !(name.is_empty() || name == "." || name == ".." || name.chars().any(path::is_separator))
}

/// Serialize a list of entries into a tree payload.
///
/// Entries are sorted by name first so that the resulting payload (and thus
/// the tree's ID) does not depend on the order in which they were gathered.
pub fn encode(entries: &mut Vec<TreeEntry>) -> Vec<u8> {
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut payload = Vec::new();
    for entry in entries.iter() {
        payload.extend_from_slice(entry.kind.as_str().as_bytes());
        payload.push(b' ');
        payload.extend_from_slice(entry.id.to_string().as_bytes());
        payload.push(b' ');
        payload.extend_from_slice(entry.name.as_bytes());
        payload.push(b'\n');
    }
    payload
}

/// Parse a tree payload into its entries, in stored order.
pub fn decode(payload: &[u8]) -> Result<Vec<TreeEntry>, ParseTreeError> {
    payload
        .split(|b| *b == b'\n')
        .filter(|line| !line.is_empty())
        .map(decode_entry)
        .collect()
}

fn decode_entry(line: &[u8]) -> Result<TreeEntry, ParseTreeError> {
    let malformed = || ParseTreeError::MalformedEntry(String::from_utf8_lossy(line).into_owned());

    let (kind, rest) = parse_utils::split_once(line, &b' ');
    let (id, name) = parse_utils::split_once(rest, &b' ');

    let kind = match Kind::from_bytes(kind) {
        Some(k @ Kind::Blob) | Some(k @ Kind::Tree) => k,
        _ => return Err(malformed()),
    };

    let id = parse_utils::object_id(id).ok_or_else(malformed)?;
    let name = std::str::from_utf8(name).map_err(|_| malformed())?;

    if !is_safe_name(name) {
        return Err(ParseTreeError::UnsafeName(name.to_string()));
    }

    Ok(TreeEntry::new(name, id, kind))
}
