use std::path::PathBuf;

use thiserror::Error;

use crate::object::{Id, Kind, ParseIdError};

/// Describes the potential error conditions that might arise from `Repo` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("object {0} not found")]
    ObjectNotFound(Id),

    #[error("object {id} is a {actual}, expected a {expected}")]
    TypeMismatch { id: Id, expected: Kind, actual: Kind },

    #[error("object {0} is corrupt")]
    MalformedObject(Id),

    #[error("tree {0} is malformed: {1}")]
    MalformedTree(Id, String),

    #[error("commit {0} is malformed: {1}")]
    MalformedCommit(Id, String),

    #[error("tree entry name `{0}` would escape its directory")]
    PathTraversalViolation(String),

    #[error("unsupported file name {0:?}")]
    UnsupportedFileName(PathBuf),

    #[error("`{0}` is not a known reference or object ID")]
    UnknownReference(String),

    #[error("reference `{0}` is invalid")]
    InvalidReferenceName(String),

    #[error("symbolic reference chain starting at `{0}` is too deep or cyclic")]
    ReferenceCycle(String),

    #[error("branch `{0}` already exists")]
    BranchExists(String),

    #[error("repository already exists at {0:?}")]
    RepoAlreadyExists(PathBuf),

    #[error("working directory {0:?} does not exist")]
    WorkDirDoesntExist(PathBuf),

    #[error("repository directory {0:?} does not exist")]
    RepoDirDoesntExist(PathBuf),

    #[error("external tool failed: {0}")]
    ExternalTool(String),

    #[error(transparent)]
    ParseIdError(#[from] ParseIdError),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for `Repo` operations.
pub type Result<T> = std::result::Result<T, Error>;
