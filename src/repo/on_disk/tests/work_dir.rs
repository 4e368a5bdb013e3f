use std::fs;

use super::super::*;

use crate::object::{tree, Kind, TreeEntry};
use crate::repo::HEAD;
use crate::test_support::TempRepo;

fn populate(tr: &mut TempRepo) {
    tr.write_file("a.txt", b"hello")
        .write_file("src/main.rs", b"fn main() {}\n")
        .write_file("src/lib/mod.rs", b"// lib\n")
        .write_file("empty.bin", b"");
}

#[test]
fn write_tree_is_stable() {
    let mut tr = TempRepo::new();
    tr.write_file("a.txt", b"hello");

    let t1 = tr.repo_mut().write_tree().unwrap();
    let t2 = tr.repo_mut().write_tree().unwrap();
    assert_eq!(t1, t2);

    let payload = tr.repo().get(&t1, Some(Kind::Tree)).unwrap();
    let blob = Object::hash(Kind::Blob, b"hello");
    assert_eq!(payload, format!("blob {} a.txt\n", blob).as_bytes());
}

#[test]
fn write_tree_ignores_metadata_dir() {
    let mut tr = TempRepo::new();
    let t_empty = tr.repo_mut().write_tree().unwrap();

    let payload = tr.repo().get(&t_empty, Some(Kind::Tree)).unwrap();
    assert!(payload.is_empty());

    // Nested metadata directories are skipped as well.
    tr.write_file("sub/.tinygit/HEAD", b"ref: refs/heads/x\n")
        .write_file("sub/f", b"f");
    let t = tr.repo_mut().write_tree().unwrap();
    let flat = tr.repo().read_tree_flat(&t, "").unwrap();
    assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["sub/f"]);
}

#[test]
fn tree_is_order_independent() {
    // Create the same file set in two repos, in opposite orders.
    let mut a = TempRepo::new();
    a.write_file("z.txt", b"z")
        .write_file("m/inner.txt", b"i")
        .write_file("a.txt", b"a");

    let mut b = TempRepo::new();
    b.write_file("a.txt", b"a")
        .write_file("m/inner.txt", b"i")
        .write_file("z.txt", b"z");

    assert_eq!(
        a.repo_mut().write_tree().unwrap(),
        b.repo_mut().write_tree().unwrap()
    );
}

#[test]
fn read_tree_flat() {
    let mut tr = TempRepo::new();
    populate(&mut tr);

    let t = tr.repo_mut().write_tree().unwrap();
    let flat = tr.repo().read_tree_flat(&t, "./").unwrap();

    assert_eq!(
        flat.keys().collect::<Vec<_>>(),
        vec!["./a.txt", "./empty.bin", "./src/lib/mod.rs", "./src/main.rs"]
    );
    assert_eq!(flat["./a.txt"], Object::hash(Kind::Blob, b"hello"));
    assert_eq!(tr.repo().working_tree().unwrap().len(), 4);
}

#[test]
fn read_tree_flat_rejects_bad_trees() {
    let mut tr = TempRepo::new();
    let blob = tr.repo_mut().put(Kind::Blob, b"x".to_vec()).unwrap();

    let evil = format!("blob {} ..\n", blob).into_bytes();
    let evil = tr.repo_mut().put(Kind::Tree, evil).unwrap();
    match tr.repo().read_tree_flat(&evil, "") {
        Err(Error::PathTraversalViolation(name)) => assert_eq!(name, ".."),
        other => panic!("unexpected result {:?}", other),
    }

    let odd = format!("commit {} x\n", blob).into_bytes();
    let odd = tr.repo_mut().put(Kind::Tree, odd).unwrap();
    match tr.repo().read_tree_flat(&odd, "") {
        Err(Error::MalformedTree(id, _)) => assert_eq!(id, odd),
        other => panic!("unexpected result {:?}", other),
    }

    // A tree entry that claims to be a tree but points at a blob.
    let liar = format!("tree {} sub\n", blob).into_bytes();
    let liar = tr.repo_mut().put(Kind::Tree, liar).unwrap();
    assert!(matches!(
        tr.repo().read_tree_flat(&liar, ""),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn materialize_round_trip() {
    let mut tr = TempRepo::new();
    populate(&mut tr);
    let before = tr.files();

    let t = tr.repo_mut().write_tree().unwrap();

    tr.write_file("a.txt", b"changed")
        .write_file("stray/file", b"stray")
        .remove_file("src/main.rs");

    tr.repo_mut().materialize(&t).unwrap();

    assert_eq!(tr.files(), before);
    assert!(!tr.path().join("stray").exists());
    assert!(tr.repo().repo_dir().join("objects").is_dir());
}

#[test]
fn materialize_leaves_nothing_from_previous_snapshot() {
    let mut tr = TempRepo::new();
    tr.write_file("a.txt", b"a");
    let t_a = tr.repo_mut().write_tree().unwrap();

    tr.write_file("b.txt", b"b").write_file("dir/c.txt", b"c");
    let t_abc = tr.repo_mut().write_tree().unwrap();
    assert_ne!(t_a, t_abc);

    tr.repo_mut().materialize(&t_abc).unwrap();
    tr.repo_mut().materialize(&t_a).unwrap();

    assert_eq!(tr.files().keys().collect::<Vec<_>>(), vec!["a.txt"]);
    assert!(!tr.path().join("dir").exists());
}

#[test]
fn materialize_matches_fixture() {
    let fixture = tempfile::tempdir().unwrap();
    let fixture_src = fixture.path().join("src");
    fs::create_dir_all(fixture_src.join("lib")).unwrap();
    fs::write(fixture_src.join("main.rs"), b"fn main() {}\n").unwrap();
    fs::write(fixture_src.join("lib/mod.rs"), b"// lib\n").unwrap();

    let mut tr = TempRepo::new();
    populate(&mut tr);
    let t = tr.repo_mut().write_tree().unwrap();

    tr.write_file("src/extra.rs", b"// not in the snapshot\n");
    tr.repo_mut().materialize(&t).unwrap();

    assert!(!dir_diff::is_different(&fixture_src, tr.path().join("src")).unwrap());
}

#[test]
fn materialize_bad_tree_keeps_work_dir() {
    let mut tr = TempRepo::new();
    tr.write_file("keep.txt", b"keep");

    let blob = tr.repo_mut().put(Kind::Blob, b"x".to_vec()).unwrap();
    let mut entries = vec![TreeEntry::new("x", blob, Kind::Blob)];
    let mut payload = tree::encode(&mut entries);
    payload.extend_from_slice(b"garbage line\n");
    let bad = tr.repo_mut().put(Kind::Tree, payload).unwrap();

    assert!(tr.repo_mut().materialize(&bad).is_err());
    assert_eq!(tr.read_file("keep.txt"), b"keep");
}

#[test]
fn materialize_missing_blob_keeps_work_dir() {
    let mut tr = TempRepo::new();
    tr.write_file("keep.txt", b"keep");

    let missing = Object::hash(Kind::Blob, b"never stored");
    let payload = format!("blob {} x\n", missing).into_bytes();
    let t = tr.repo_mut().put(Kind::Tree, payload).unwrap();

    match tr.repo_mut().materialize(&t) {
        Err(Error::ObjectNotFound(id)) => assert_eq!(id, missing),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(tr.read_file("keep.txt"), b"keep");
    assert!(!tr.path().join("x").exists());
}

#[test]
fn materialize_non_blob_entry_keeps_work_dir() {
    let mut tr = TempRepo::new();
    tr.write_file("keep.txt", b"keep");
    let c1 = tr.repo_mut().commit("first").unwrap();

    // A blob entry that actually names a commit.
    let payload = format!("blob {} x\n", c1).into_bytes();
    let t = tr.repo_mut().put(Kind::Tree, payload).unwrap();

    assert!(matches!(
        tr.repo_mut().materialize(&t),
        Err(Error::TypeMismatch { .. })
    ));
    assert_eq!(tr.read_file("keep.txt"), b"keep");
}

#[cfg(unix)]
#[test]
fn backslash_in_file_name() {
    let mut tr = TempRepo::new();
    tr.write_file("a\\b", b"odd").write_file("ok.txt", b"ok");

    let c1 = tr.repo_mut().commit("first").unwrap();
    let tree = tr.repo().parse_commit(&c1).unwrap().tree;
    let flat = tr.repo().read_tree_flat(&tree, "").unwrap();
    assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["a\\b", "ok.txt"]);

    tr.remove_file("a\\b");
    tr.repo_mut().checkout(&c1.to_string()).unwrap();
    assert_eq!(tr.read_file("a\\b"), b"odd");
}

#[cfg(unix)]
#[test]
fn symlinks_are_not_followed() {
    let mut tr = TempRepo::new();
    tr.write_file("real.txt", b"real");
    std::os::unix::fs::symlink(tr.path().join("real.txt"), tr.path().join("link.txt")).unwrap();

    let t = tr.repo_mut().write_tree().unwrap();
    let flat = tr.repo().read_tree_flat(&t, "").unwrap();
    assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["real.txt"]);

    // Materializing removes the link along with everything else.
    tr.repo_mut().materialize(&t).unwrap();
    assert!(fs::symlink_metadata(tr.path().join("link.txt")).is_err());
}

#[test]
fn commit_and_checkout_branch() {
    let mut tr = TempRepo::new();
    tr.write_file("a.txt", b"one");
    let c1 = tr.repo_mut().commit("first").unwrap();

    tr.repo_mut().create_branch("feature", &c1).unwrap();

    tr.write_file("a.txt", b"two").write_file("b.txt", b"new");
    let c2 = tr.repo_mut().commit("second").unwrap();

    assert_eq!(tr.repo_mut().checkout("feature").unwrap(), c1);
    assert_eq!(tr.read_file("a.txt"), b"one");
    assert!(!tr.path().join("b.txt").exists());
    assert_eq!(
        tr.repo().resolve_ref(HEAD, false).unwrap().unwrap().value,
        RefValue::Symbolic("refs/heads/feature".to_string())
    );
    assert_eq!(tr.repo().current_branch().unwrap(), Some("feature".to_string()));

    // Committing now advances the branch, not a detached HEAD.
    tr.write_file("c.txt", b"on feature");
    let c3 = tr.repo_mut().commit("third").unwrap();

    assert_eq!(tr.repo().resolve_name("feature").unwrap(), c3);
    assert_eq!(tr.repo().parse_commit(&c3).unwrap().parent, Some(c1));
    assert_eq!(
        tr.repo().read_ref(HEAD).unwrap(),
        Some(RefValue::Symbolic("refs/heads/feature".to_string()))
    );

    // The detached commit c2 is unaffected.
    assert_eq!(tr.repo().parse_commit(&c2).unwrap().parent, Some(c1));
}

#[test]
fn checkout_id_detaches_head() {
    let mut tr = TempRepo::new();
    tr.write_file("a.txt", b"one");
    let c1 = tr.repo_mut().commit("first").unwrap();
    tr.write_file("a.txt", b"two");
    tr.repo_mut().commit("second").unwrap();

    tr.repo_mut().checkout(&c1.to_string()).unwrap();

    assert_eq!(tr.read_file("a.txt"), b"one");
    assert_eq!(tr.repo().read_ref(HEAD).unwrap(), Some(RefValue::Direct(c1)));
    assert_eq!(tr.repo().current_branch().unwrap(), None);
}

#[test]
fn checkout_tag_detaches_head() {
    let mut tr = TempRepo::new();
    tr.write_file("a.txt", b"one");
    let c1 = tr.repo_mut().commit("first").unwrap();
    tr.repo_mut().create_tag("v1", &c1).unwrap();

    tr.write_file("a.txt", b"two");
    tr.repo_mut().commit("second").unwrap();

    tr.repo_mut().checkout("v1").unwrap();
    assert_eq!(tr.repo().read_ref(HEAD).unwrap(), Some(RefValue::Direct(c1)));
}

#[test]
fn checkout_unknown_name() {
    let mut tr = TempRepo::new();
    tr.write_file("a.txt", b"one");

    match tr.repo_mut().checkout("nope") {
        Err(Error::UnknownReference(name)) => assert_eq!(name, "nope"),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(tr.read_file("a.txt"), b"one");
}

#[test]
fn checkout_non_commit_fails() {
    let mut tr = TempRepo::new();
    tr.write_file("a.txt", b"one");
    let t = tr.repo_mut().write_tree().unwrap();

    assert!(matches!(
        tr.repo_mut().checkout(&t.to_string()),
        Err(Error::TypeMismatch { .. })
    ));
    assert_eq!(tr.repo().read_ref(HEAD).unwrap(), None);
}
