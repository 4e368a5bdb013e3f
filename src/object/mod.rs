//! Represents the concept of an "object" which is a tuple of
//! object kind and binary data identified by the hash of both.

pub mod commit;
pub use commit::{Commit, ParseCommitError};

mod id;
pub use id::{Id, ParseIdError};

mod kind;
pub use kind::Kind;

pub(crate) mod parse_utils;

pub mod tree;
pub use tree::{ParseTreeError, TreeEntry};

/// Describes a single object stored (or about to be stored) in a repository.
///
/// The ID is computed eagerly from the kind and content, so two objects
/// with the same kind and content always compare equal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Object {
    id: Id,
    kind: Kind,
    content: Vec<u8>,
}

impl Object {
    /// Create a new Object.
    pub fn new(kind: Kind, content: Vec<u8>) -> Object {
        Object {
            id: Id::for_content(kind, &content),
            kind,
            content,
        }
    }

    /// Computes the ID that `content` would have as an object of `kind`
    /// without building the object.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn hash(kind: Kind, content: &[u8]) -> Id {
        Id::for_content(kind, content)
    }

    /// Rebuild an object from its stored form (`<kind>\0<content>`).
    ///
    /// Returns `None` if there is no NUL separator or the kind tag is unknown.
    pub fn from_tagged_bytes(bytes: &[u8]) -> Option<Object> {
        let nul = bytes.iter().position(|b| *b == 0)?;
        let kind = Kind::from_bytes(&bytes[..nul])?;
        Some(Object::new(kind, bytes[nul + 1..].to_vec()))
    }

    /// Return the stored form of this object (`<kind>\0<content>`).
    pub fn to_tagged_bytes(&self) -> Vec<u8> {
        let tag = self.kind.as_str().as_bytes();
        let mut bytes = Vec::with_capacity(tag.len() + 1 + self.content.len());
        bytes.extend_from_slice(tag);
        bytes.push(0);
        bytes.extend_from_slice(&self.content);
        bytes
    }

    /// Return the ID of the object.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the content of the object.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the object and return its content.
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Return the size (in bytes) of the object's content.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the object's content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
