use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Describes the fundamental object type (blob, tree, or commit).
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
}

impl Kind {
    /// Return the ASCII tag used for this kind in stored objects
    /// and in tree entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
        }
    }

    /// Parse a kind tag from raw bytes.
    pub fn from_bytes(tag: &[u8]) -> Option<Kind> {
        match tag {
            b"blob" => Some(Kind::Blob),
            b"tree" => Some(Kind::Tree),
            b"commit" => Some(Kind::Commit),
            _ => None,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_bytes(s.as_bytes())
            .ok_or_else(|| format!("unknown object kind `{}`", s))
    }
}
