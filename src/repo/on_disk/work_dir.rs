use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{OnDisk, REPO_DIR_NAME};
use crate::object::{tree, Id, Kind, Object, TreeEntry};
use crate::repo::{Error, RefValue, Repo, Result, BRANCH_PREFIX, HEAD};

// A child of a working directory that can be recorded in a tree.
struct Child {
    name: String,
    path: PathBuf,
    kind: Kind,
}

// List the children of `dir` that belong in a snapshot. The metadata
// directory and anything that is neither a regular file nor a directory
// (symlinks in particular) are left out.
fn children(dir: &Path) -> Result<Vec<Child>> {
    let mut result = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        let name = match entry.file_name().into_string() {
            Ok(name) if name == REPO_DIR_NAME => continue,
            Ok(name) if tree::is_safe_name(&name) && !name.contains('\n') => name,
            _ => return Err(Error::UnsupportedFileName(path)),
        };

        let file_type = entry.file_type()?;
        let kind = if file_type.is_file() {
            Kind::Blob
        } else if file_type.is_dir() {
            Kind::Tree
        } else {
            debug!("skipping special file {}", path.display());
            continue;
        };

        result.push(Child { name, path, kind });
    }

    Ok(result)
}

fn join_tree_path(root: &Path, path: &str) -> PathBuf {
    path.split('/')
        .fold(root.to_path_buf(), |full, segment| full.join(segment))
}

// Remove every file below `dir` and then every directory that ends up empty.
// Directories that can't be removed (because they still hold the metadata
// directory, for instance) are left in place.
fn empty_dir(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name() == REPO_DIR_NAME {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            empty_dir(&path)?;
            if let Err(err) = fs::remove_dir(&path) {
                debug!("leaving {} in place: {}", path.display(), err);
            }
        } else {
            fs::remove_file(&path)?;
        }
    }

    Ok(())
}

impl OnDisk {
    /// Snapshot the whole working directory as a tree object and return
    /// the tree's ID.
    pub fn write_tree(&mut self) -> Result<Id> {
        let work_dir = self.work_dir.clone();
        self.write_tree_at(&work_dir)
    }

    /// Snapshot the directory at `dir` (recursively) as a tree object.
    ///
    /// Every regular file is stored as a blob. Entries are sorted by name,
    /// so the result does not depend on directory enumeration order.
    pub fn write_tree_at(&mut self, dir: &Path) -> Result<Id> {
        let mut entries = Vec::new();

        for child in children(dir)? {
            let id = match child.kind {
                Kind::Blob => self.put(Kind::Blob, fs::read(&child.path)?)?,
                _ => self.write_tree_at(&child.path)?,
            };
            entries.push(TreeEntry::new(child.name, id, child.kind));
        }

        let payload = tree::encode(&mut entries);
        self.put(Kind::Tree, payload)
    }

    /// Map every file in the working directory to the blob ID it would have,
    /// without storing anything.
    pub fn working_tree(&self) -> Result<BTreeMap<String, Id>> {
        let mut result = BTreeMap::new();
        hash_dir_into(&self.work_dir, "", &mut result)?;
        Ok(result)
    }

    /// Replace the contents of the working directory with the snapshot
    /// stored in `tree`.
    ///
    /// Every file outside `.tinygit` is deleted first, so nothing from the
    /// previous contents survives. The tree and all of its blobs are loaded
    /// before anything is deleted; if any of them is missing or corrupt, the
    /// working directory is left as it was.
    pub fn materialize(&mut self, tree: &Id) -> Result<()> {
        let files = self
            .read_tree_flat(tree, "")?
            .into_iter()
            .map(|(path, id)| Ok((path, self.get(&id, Some(Kind::Blob))?)))
            .collect::<Result<Vec<(String, Vec<u8>)>>>()?;

        empty_dir(&self.work_dir)?;

        for (path, content) in files.iter() {
            let full_path = join_tree_path(&self.work_dir, path);

            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&full_path, content)?;
        }

        debug!("materialized tree {} ({} files)", tree, files.len());
        Ok(())
    }

    /// Snapshot the working directory and commit it on top of `HEAD`.
    pub fn commit(&mut self, message: &str) -> Result<Id> {
        let tree = self.write_tree()?;
        self.commit_tree(&tree, message)
    }

    /// Materialize the commit named by `token` and move `HEAD` to it.
    ///
    /// If `token` is a branch name, `HEAD` is bound symbolically to that
    /// branch. Otherwise `HEAD` is detached and points at the commit itself.
    pub fn checkout(&mut self, token: &str) -> Result<Id> {
        let id = self.resolve_name(token)?;
        let commit = self.parse_commit(&id)?;

        self.materialize(&commit.tree)?;

        let head = if self.is_branch(token)? {
            RefValue::Symbolic(format!("{}{}", BRANCH_PREFIX, token))
        } else {
            RefValue::Direct(id)
        };

        info!("checked out {} ({})", token, head);
        self.set_ref(HEAD, head, false)?;
        Ok(id)
    }
}

fn hash_dir_into(dir: &Path, base_path: &str, result: &mut BTreeMap<String, Id>) -> Result<()> {
    for child in children(dir)? {
        let path = format!("{}{}", base_path, child.name);
        match child.kind {
            Kind::Blob => {
                let id = Object::hash(Kind::Blob, &fs::read(&child.path)?);
                result.insert(path, id);
            }
            _ => hash_dir_into(&child.path, &format!("{}/", path), result)?,
        }
    }

    Ok(())
}
