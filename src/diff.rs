//! Compare flattened trees and render unified diffs.
//!
//! Text diffs are produced by the system `diff` program. Set `TINYGIT_DIFF`
//! to use a different (compatible) program.

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::object::{Id, Kind};
use crate::repo::{Error, Repo, Result};

const DIFF_PROGRAM_VAR: &str = "TINYGIT_DIFF";
const DEFAULT_DIFF_PROGRAM: &str = "diff";

/// How a single path differs between two snapshots.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Change {
    Added,
    Deleted,
    Modified,
}

impl Change {
    pub fn as_str(&self) -> &'static str {
        match self {
            Change::Added => "new file",
            Change::Deleted => "deleted",
            Change::Modified => "modified",
        }
    }
}

/// Line up any number of flattened trees by path.
///
/// Each path that appears in at least one tree is reported once, in sorted
/// order, along with its blob ID in each tree (`None` where it is absent).
pub fn compare_trees(trees: &[&BTreeMap<String, Id>]) -> Vec<(String, Vec<Option<Id>>)> {
    let paths: BTreeSet<&String> = trees.iter().flat_map(|t| t.keys()).collect();

    paths
        .into_iter()
        .map(|path| {
            let ids = trees.iter().map(|t| t.get(path).copied()).collect();
            (path.clone(), ids)
        })
        .collect()
}

/// List the paths whose content differs between `from` and `to`.
pub fn changed_files(
    from: &BTreeMap<String, Id>,
    to: &BTreeMap<String, Id>,
) -> Vec<(String, Change)> {
    compare_trees(&[from, to])
        .into_iter()
        .filter_map(|(path, ids)| {
            let change = match (ids[0], ids[1]) {
                (None, Some(_)) => Change::Added,
                (Some(_), None) => Change::Deleted,
                (Some(a), Some(b)) if a != b => Change::Modified,
                _ => return None,
            };
            Some((path, change))
        })
        .collect()
}

/// Produce a unified diff of every changed path between two flattened trees.
pub fn diff_trees<R: Repo + ?Sized>(
    repo: &R,
    from: &BTreeMap<String, Id>,
    to: &BTreeMap<String, Id>,
) -> Result<Vec<u8>> {
    let mut output = Vec::new();

    for (path, ids) in compare_trees(&[from, to]) {
        if ids[0] != ids[1] {
            output.extend(diff_blobs(repo, ids[0].as_ref(), ids[1].as_ref(), &path)?);
        }
    }

    Ok(output)
}

/// Produce a unified diff between two blobs. A missing side is treated as
/// an empty file.
pub fn diff_blobs<R: Repo + ?Sized>(
    repo: &R,
    from: Option<&Id>,
    to: Option<&Id>,
    path: &str,
) -> Result<Vec<u8>> {
    let program = env::var(DIFF_PROGRAM_VAR).unwrap_or_else(|_| DEFAULT_DIFF_PROGRAM.to_string());

    let from = blob_or_empty(repo, from)?;
    let to = blob_or_empty(repo, to)?;

    run_diff(&program, &from, &to, path)
}

fn blob_or_empty<R: Repo + ?Sized>(repo: &R, id: Option<&Id>) -> Result<Vec<u8>> {
    match id {
        Some(id) => repo.get(id, Some(Kind::Blob)),
        None => Ok(Vec::new()),
    }
}

fn run_diff(program: &str, from: &[u8], to: &[u8], path: &str) -> Result<Vec<u8>> {
    let mut from_file = NamedTempFile::new()?;
    from_file.write_all(from)?;
    from_file.flush()?;

    let mut to_file = NamedTempFile::new()?;
    to_file.write_all(to)?;
    to_file.flush()?;

    debug!("running {} for {}", program, path);

    let output = Command::new(program)
        .arg("--unified")
        .arg("--show-c-function")
        .arg("--label")
        .arg(format!("a/{}", path))
        .arg(from_file.path())
        .arg("--label")
        .arg(format!("b/{}", path))
        .arg(to_file.path())
        .output()
        .map_err(|err| Error::ExternalTool(format!("couldn't run `{}`: {}", program, err)))?;

    // diff exits with 1 when the inputs differ.
    match output.status.code() {
        Some(0) | Some(1) => Ok(output.stdout),
        _ => Err(Error::ExternalTool(format!(
            "`{}` failed ({}): {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ))),
    }
}
