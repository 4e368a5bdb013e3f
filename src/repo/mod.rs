//! Represents an abstract repository.
//!
//! ## Design Goals
//!
//! Repositories may be stored in multiple different mechanisms. The crate
//! includes built-in support for local on-disk repositories
//! (see `tinygit::repo::on_disk`), but the object and reference layers only
//! depend on the handful of storage primitives required by the `Repo` trait.

use std::collections::BTreeMap;

use crate::object::{tree, Commit, Id, Kind, Object, ParseTreeError};

mod error;
pub use error::{Error, Result};

mod history;
pub use history::Ancestors;

pub mod on_disk;

mod refs;
pub use refs::{check_ref_name, Ref, RefValue, BRANCH_PREFIX, HEAD, MAX_SYMREF_DEPTH, TAG_PREFIX};

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing a repository.
///
/// The required methods on this trait represent the most primitive operations
/// which must be defined for a given storage architecture: an append-only
/// object store and a set of named reference cells.
///
/// The provided methods on this trait represent the common operations built
/// on top of those primitives (reference resolution, name lookup, commit
/// parsing, history traversal), regardless of storage mechanism.
pub trait Repo {
    /// Store `object` under its ID.
    ///
    /// Must be a no-op if an object with the same ID is already present.
    fn put_object(&mut self, object: &Object) -> Result<()>;

    /// Load the object with the given ID.
    ///
    /// Fails with `ObjectNotFound` if there is no such object.
    fn get_object(&self, id: &Id) -> Result<Object>;

    /// Read the raw value of a single reference cell without following
    /// symbolic references. Returns `None` if the cell doesn't exist.
    fn read_ref(&self, name: &str) -> Result<Option<RefValue>>;

    /// Overwrite a single reference cell, creating it if necessary.
    fn write_ref(&mut self, name: &str, value: &RefValue) -> Result<()>;

    /// List the names of every reference under `refs/`, sorted.
    fn ref_names(&self) -> Result<Vec<String>>;

    /// Store `content` as an object of the given kind and return its ID.
    fn put(&mut self, kind: Kind, content: Vec<u8>) -> Result<Id> {
        let object = Object::new(kind, content);
        self.put_object(&object)?;
        Ok(object.id())
    }

    /// Return the content of the object with the given ID.
    ///
    /// If `expected` is given, the stored kind must match it or the call fails
    /// with `TypeMismatch`.
    fn get(&self, id: &Id, expected: Option<Kind>) -> Result<Vec<u8>> {
        let object = self.get_object(id)?;

        match expected {
            Some(kind) if kind != object.kind() => Err(Error::TypeMismatch {
                id: *id,
                expected: kind,
                actual: object.kind(),
            }),
            _ => Ok(object.into_content()),
        }
    }

    /// Return the kind of the object with the given ID.
    fn get_kind(&self, id: &Id) -> Result<Kind> {
        Ok(self.get_object(id)?.kind())
    }

    /// Recursively expand a tree into a mapping from relative file path
    /// (each prefixed with `base_path`) to blob ID.
    fn read_tree_flat(&self, id: &Id, base_path: &str) -> Result<BTreeMap<String, Id>> {
        let mut result = BTreeMap::new();
        read_tree_into(self, id, base_path, &mut result)?;
        Ok(result)
    }

    /// Load and parse the commit with the given ID.
    fn parse_commit(&self, id: &Id) -> Result<Commit> {
        let payload = self.get(id, Some(Kind::Commit))?;
        Commit::parse(&payload).map_err(|err| Error::MalformedCommit(*id, err.to_string()))
    }

    /// Resolve a reference by name.
    ///
    /// Returns `None` if the reference (or, when following, the end of its
    /// symbolic chain) doesn't exist. If `follow_symbolic` is false, a symbolic
    /// reference is returned as-is, naming its target.
    fn resolve_ref(&self, name: &str, follow_symbolic: bool) -> Result<Option<Ref>> {
        refs::resolve(self, name, follow_symbolic)
    }

    /// Point a reference at a new value.
    ///
    /// If `follow_symbolic` is true, the write lands on the last reference in
    /// `name`'s symbolic chain, so that updating a symbolic `HEAD` advances the
    /// branch it names. Otherwise `name` itself is overwritten.
    fn set_ref(&mut self, name: &str, value: RefValue, follow_symbolic: bool) -> Result<()> {
        refs::set(self, name, value, follow_symbolic)
    }

    /// List `HEAD` (if present) and every reference under `refs/`.
    fn refs(&self, follow_symbolic: bool) -> Result<Vec<Ref>> {
        self.refs_with_prefix("", follow_symbolic)
    }

    /// List the references whose names start with `prefix`.
    fn refs_with_prefix(&self, prefix: &str, follow_symbolic: bool) -> Result<Vec<Ref>> {
        refs::list(self, prefix, follow_symbolic)
    }

    /// Turn a user-supplied name (reference, branch, tag, or object ID)
    /// into an object ID.
    fn resolve_name(&self, token: &str) -> Result<Id> {
        refs::resolve_name(self, token)
    }

    /// Return the current branch name, or `None` if `HEAD` is detached
    /// or absent.
    fn current_branch(&self) -> Result<Option<String>> {
        refs::current_branch(self)
    }

    /// Returns true if a branch named `name` exists.
    fn is_branch(&self, name: &str) -> Result<bool> {
        Ok(refs::is_valid_ref_name(&format!("{}{}", BRANCH_PREFIX, name))
            && self.read_ref(&format!("{}{}", BRANCH_PREFIX, name))?.is_some())
    }

    /// List the names of all branches (without the `refs/heads/` prefix).
    fn branch_names(&self) -> Result<Vec<String>> {
        Ok(self
            .ref_names()?
            .into_iter()
            .filter_map(|name| name.strip_prefix(BRANCH_PREFIX).map(|n| n.to_string()))
            .collect())
    }

    /// Record a commit of `tree` on top of whatever `HEAD` resolves to and
    /// advance `HEAD` (through any symbolic chain) to it.
    fn commit_tree(&mut self, tree: &Id, message: &str) -> Result<Id> {
        history::commit_tree(self, tree, message)
    }

    /// Create a branch pointing at `start`.
    ///
    /// Fails with `BranchExists` if the branch already points elsewhere.
    fn create_branch(&mut self, name: &str, start: &Id) -> Result<()> {
        history::create_branch(self, name, start)
    }

    /// Create (or move) a tag pointing at `id`.
    fn create_tag(&mut self, name: &str, id: &Id) -> Result<()> {
        history::create_tag(self, name, id)
    }

    /// Point whatever `HEAD` resolves to at `id`, leaving the working
    /// directory alone.
    fn reset(&mut self, id: &Id) -> Result<()> {
        self.set_ref(HEAD, RefValue::Direct(*id), true)
    }

    /// Walk commit history from each of `starts` in turn, yielding every
    /// reachable commit exactly once.
    fn ancestors<I>(&self, starts: I) -> Ancestors<'_, Self>
    where
        I: IntoIterator<Item = Id>,
        Self: Sized,
    {
        Ancestors::new(self, starts)
    }
}

fn read_tree_into<R: Repo + ?Sized>(
    repo: &R,
    id: &Id,
    base_path: &str,
    result: &mut BTreeMap<String, Id>,
) -> Result<()> {
    let payload = repo.get(id, Some(Kind::Tree))?;

    let entries = tree::decode(&payload).map_err(|err| match err {
        ParseTreeError::UnsafeName(name) => Error::PathTraversalViolation(name),
        ParseTreeError::MalformedEntry(line) => {
            Error::MalformedTree(*id, format!("malformed entry `{}`", line))
        }
    })?;

    for entry in entries {
        let path = format!("{}{}", base_path, entry.name);
        match entry.kind {
            Kind::Blob => {
                result.insert(path, entry.id);
            }
            Kind::Tree => {
                read_tree_into(repo, &entry.id, &format!("{}/", path), result)?;
            }
            Kind::Commit => {
                // tree::decode only yields blob and tree entries.
                return Err(Error::MalformedTree(*id, format!("unexpected commit entry `{}`", path)));
            }
        }
    }

    Ok(())
}
