//! A repository that stores content on the local file system.
//!
//! Everything lives in a `.tinygit` directory at the top of the working
//! directory:
//!
//! ```text
//! .tinygit/
//!   config
//!   HEAD                 (absent until the first commit or checkout)
//!   objects/<id>         (`<kind>\0<content>`, uncompressed)
//!   refs/heads/<name>
//!   refs/tags/<name>
//! ```
//!
//! Objects and references are written to a temporary file inside `.tinygit`
//! and then renamed into place, so a crash never leaves a truncated file
//! under `objects/` or `refs/`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{check_ref_name, Error, RefValue, Repo, Result};
use crate::object::{Id, Object};

mod work_dir;

/// Name of the metadata directory inside the working directory.
pub const REPO_DIR_NAME: &str = ".tinygit";

/// Implementation of `tinygit::repo::Repo` that stores content on the local file system.
#[derive(Debug)]
pub struct OnDisk {
    work_dir: PathBuf,
    repo_dir: PathBuf,
}

impl OnDisk {
    /// Open an existing on-disk repository.
    ///
    /// `work_dir` should be the top-level working directory. A `.tinygit`
    /// directory should exist at this path. Use `init` to create an empty
    /// on-disk repository if necessary.
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref().to_path_buf();
        if !work_dir.is_dir() {
            return Err(Error::WorkDirDoesntExist(work_dir));
        }

        let repo_dir = work_dir.join(REPO_DIR_NAME);
        if !repo_dir.is_dir() {
            return Err(Error::RepoDirDoesntExist(repo_dir));
        }

        Ok(OnDisk { work_dir, repo_dir })
    }

    /// Creates a new, empty repository on the local file system.
    ///
    /// The new repository has no objects and no `HEAD`.
    pub fn init<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref().to_path_buf();
        let repo_dir = work_dir.join(REPO_DIR_NAME);
        if repo_dir.exists() {
            return Err(Error::RepoAlreadyExists(repo_dir));
        }

        fs::create_dir_all(&repo_dir)?;

        create_config(&repo_dir)?;
        create_objects_dir(&repo_dir)?;
        create_refs_dir(&repo_dir)?;

        info!("initialized empty repository in {}", repo_dir.display());
        Ok(OnDisk { work_dir, repo_dir })
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.tinygit` directory.
    pub fn repo_dir(&self) -> &Path {
        self.repo_dir.as_path()
    }

    fn object_path(&self, id: &Id) -> PathBuf {
        self.repo_dir.join("objects").join(id.to_string())
    }

    fn ref_path(&self, name: &str) -> PathBuf {
        name.split('/')
            .fold(self.repo_dir.clone(), |path, segment| path.join(segment))
    }

    // Write `contents` to `path` via a temporary file in the repo directory,
    // which is on the same file system, so the final rename is atomic.
    fn write_atomically(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut temp = NamedTempFile::new_in(&self.repo_dir)?;
        temp.write_all(contents)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|err| err.error)?;

        Ok(())
    }
}

impl Repo for OnDisk {
    fn put_object(&mut self, object: &Object) -> Result<()> {
        let path = self.object_path(&object.id());

        if path.is_file() {
            debug!("object {} already present", object.id());
            return Ok(());
        }

        self.write_atomically(&path, &object.to_tagged_bytes())?;
        debug!("wrote {} {}", object.kind(), object.id());
        Ok(())
    }

    fn get_object(&self, id: &Id) -> Result<Object> {
        let bytes = match fs::read(self.object_path(id)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ObjectNotFound(*id));
            }
            Err(err) => return Err(err.into()),
        };

        match Object::from_tagged_bytes(&bytes) {
            Some(object) if object.id() == *id => Ok(object),
            _ => Err(Error::MalformedObject(*id)),
        }
    }

    fn read_ref(&self, name: &str) -> Result<Option<RefValue>> {
        check_ref_name(name)?;

        let path = self.ref_path(name);
        if !path.is_file() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path)?;
        Ok(Some(RefValue::parse(&value)?))
    }

    fn write_ref(&mut self, name: &str, value: &RefValue) -> Result<()> {
        check_ref_name(name)?;

        let path = self.ref_path(name);
        self.write_atomically(&path, format!("{}\n", value).as_bytes())
    }

    fn ref_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        let refs_dir = self.repo_dir.join("refs");
        if refs_dir.is_dir() {
            collect_ref_names(&refs_dir, "refs", &mut names)?;
        }

        names.sort();
        Ok(names)
    }
}

fn collect_ref_names(dir: &Path, prefix: &str, names: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;

        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                debug!("skipping non-UTF-8 reference name {:?}", name);
                continue;
            }
        };

        let full_name = format!("{}/{}", prefix, file_name);
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            collect_ref_names(&entry.path(), &full_name, names)?;
        } else if file_type.is_file() {
            names.push(full_name);
        }
    }

    Ok(())
}

fn create_config(repo_dir: &Path) -> Result<()> {
    let config_path = repo_dir.join("config");
    let config_txt = "[core]\n\tformatversion = 0\n";

    fs::write(config_path, config_txt).map_err(|e| e.into())
}

fn create_objects_dir(repo_dir: &Path) -> Result<()> {
    let objects_dir = repo_dir.join("objects");
    fs::create_dir_all(&objects_dir).map_err(|e| e.into())
}

fn create_refs_dir(repo_dir: &Path) -> Result<()> {
    let heads_dir = repo_dir.join("refs/heads");
    fs::create_dir_all(&heads_dir)?;

    let tags_dir = repo_dir.join("refs/tags");
    fs::create_dir_all(&tags_dir).map_err(|e| e.into())
}

#[cfg(test)]
mod tests;
