use thiserror::Error;

use super::{parse_utils, Id};

/// Reasons why a commit payload can not be decoded.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseCommitError {
    #[error("commit has no tree header")]
    MissingTree,

    #[error("unknown commit header `{0}`")]
    UnknownHeader(String),

    #[error("invalid object ID in `{0}` header")]
    InvalidId(String),

    #[error("commit has more than one `{0}` header")]
    DuplicateHeader(String),

    #[error("commit message is not valid UTF-8")]
    InvalidMessage,
}

/// A snapshot of the working directory (`tree`) linked to at most one
/// earlier commit (`parent`), with a free-text message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commit {
    pub tree: Id,
    pub parent: Option<Id>,
    pub message: String,
}

impl Commit {
    /// Render the commit as an object payload.
    pub fn to_payload(&self) -> Vec<u8> {
        let mut s = format!("tree {}\n", self.tree);
        if let Some(parent) = self.parent {
            s.push_str(&format!("parent {}\n", parent));
        }
        s.push('\n');
        s.push_str(&self.message);
        s.push('\n');
        s.into_bytes()
    }

    /// Parse a commit object payload.
    pub fn parse(payload: &[u8]) -> Result<Commit, ParseCommitError> {
        let mut tree: Option<Id> = None;
        let mut parent: Option<Id> = None;
        let mut rest = payload;

        loop {
            let (line, remainder) = parse_utils::split_once(rest, &b'\n');
            rest = remainder;

            if line.is_empty() {
                break;
            }

            let (name, value) = parse_utils::split_once(line, &b' ');
            let name = String::from_utf8_lossy(name).into_owned();

            let slot = match name.as_str() {
                "tree" => &mut tree,
                "parent" => &mut parent,
                _ => return Err(ParseCommitError::UnknownHeader(name)),
            };

            if slot.is_some() {
                return Err(ParseCommitError::DuplicateHeader(name));
            }

            *slot = Some(
                parse_utils::object_id(value).ok_or_else(|| ParseCommitError::InvalidId(name))?,
            );
        }

        let tree = tree.ok_or(ParseCommitError::MissingTree)?;

        let message = rest.strip_suffix(b"\n").unwrap_or(rest);
        let message = std::str::from_utf8(message)
            .map_err(|_| ParseCommitError::InvalidMessage)?
            .to_string();

        Ok(Commit {
            tree,
            parent,
            message,
        })
    }
}
