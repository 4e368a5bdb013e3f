use std::{fs, path::Path};

use assert_cmd::Command;

// Build a `tinygit` invocation that runs inside `dir` with logging
// left at its default level.
pub fn tinygit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tinygit").unwrap();
    cmd.current_dir(dir).env_remove("TINYGIT_LOG");
    cmd
}

// Run `tinygit` with the given arguments, expect success, and return
// its trimmed stdout.
#[allow(dead_code)]
pub fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = tinygit(dir).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "tinygit {:?} failed:\n{}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[allow(dead_code)]
pub fn read_file(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap()
}
