use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::repo::on_disk::{OnDisk, REPO_DIR_NAME};

/// A `TempRepo` creates a temporary, empty repository in a fresh
/// directory. The directory is deleted when the struct is dropped.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub(crate) struct TempRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    repo: OnDisk,
}

#[allow(dead_code)]
impl TempRepo {
    pub fn new() -> TempRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let repo = OnDisk::init(tempdir.path()).unwrap();
        TempRepo { tempdir, repo }
    }

    // Return the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.repo.work_dir()
    }

    pub fn repo(&self) -> &OnDisk {
        &self.repo
    }

    pub fn repo_mut(&mut self) -> &mut OnDisk {
        &mut self.repo
    }

    fn full_path(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .fold(self.path().to_path_buf(), |p, segment| p.join(segment))
    }

    // Write a file relative to the working directory, creating
    // parent directories as needed.
    pub fn write_file(&mut self, rel: &str, content: &[u8]) -> &mut TempRepo {
        let path = self.full_path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn read_file(&self, rel: &str) -> Vec<u8> {
        fs::read(self.full_path(rel)).unwrap()
    }

    pub fn remove_file(&mut self, rel: &str) -> &mut TempRepo {
        fs::remove_file(self.full_path(rel)).unwrap();
        self
    }

    // Every file in the working directory (outside the metadata directory),
    // keyed by `/`-separated relative path.
    pub fn files(&self) -> BTreeMap<String, Vec<u8>> {
        let mut result = BTreeMap::new();
        collect_files(self.path(), "", &mut result);
        result
    }
}

fn collect_files(dir: &Path, prefix: &str, result: &mut BTreeMap<String, Vec<u8>>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let name = entry.file_name().into_string().unwrap();
        if name == REPO_DIR_NAME {
            continue;
        }

        let rel = format!("{}{}", prefix, name);
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, &format!("{}/", rel), result);
        } else {
            result.insert(rel, fs::read(&path).unwrap());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TempRepo;

    #[test]
    fn temp_path() {
        let path = {
            let mut r = TempRepo::new();
            r.write_file("a/b.txt", b"x");

            let path = r.path().to_path_buf();
            assert!(path.join(".tinygit").is_dir());
            assert_eq!(r.read_file("a/b.txt"), b"x");
            assert_eq!(r.files().keys().collect::<Vec<_>>(), vec!["a/b.txt"]);

            path
        };

        assert_eq!(path.as_path().is_dir(), false);
    }
}
