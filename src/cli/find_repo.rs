use std::path::Path;

use tinygit::repo::{on_disk::OnDisk, Result};

// Open the repository rooted at the given path.
//
// Only the simplest layout is supported: a `.tinygit` directory directly
// inside `path`. Parent directories are not searched.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OnDisk> {
    OnDisk::new(path)
}
