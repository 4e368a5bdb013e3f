use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use tinygit::object::{Commit, Id};
use tinygit::repo::{on_disk::OnDisk, Repo, HEAD};

use crate::{find_repo, App, Result};

mod branch;
mod cat_file;
mod checkout;
mod commit;
mod diff;
mod hash_object;
mod init;
mod k;
mod log;
mod read_tree;
mod reset;
mod show;
mod status;
mod tag;
mod write_tree;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(branch::subcommand())
        .subcommand(cat_file::subcommand())
        .subcommand(checkout::subcommand())
        .subcommand(commit::subcommand())
        .subcommand(diff::subcommand())
        .subcommand(hash_object::subcommand())
        .subcommand(init::subcommand())
        .subcommand(k::subcommand())
        .subcommand(log::subcommand())
        .subcommand(read_tree::subcommand())
        .subcommand(reset::subcommand())
        .subcommand(show::subcommand())
        .subcommand(status::subcommand())
        .subcommand(tag::subcommand())
        .subcommand(write_tree::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("branch", Some(m)) => branch::run(app, m),
        ("cat-file", Some(m)) => cat_file::run(app, m),
        ("checkout", Some(m)) => checkout::run(app, m),
        ("commit", Some(m)) => commit::run(app, m),
        ("diff", Some(m)) => diff::run(app, m),
        ("hash-object", Some(m)) => hash_object::run(app, m),
        ("init", Some(m)) => init::run(app, m),
        ("k", Some(m)) => k::run(app, m),
        ("log", Some(m)) => log::run(app, m),
        ("read-tree", Some(m)) => read_tree::run(app, m),
        ("reset", Some(m)) => reset::run(app, m),
        ("show", Some(m)) => show::run(app, m),
        ("status", Some(m)) => status::run(app, m),
        ("tag", Some(m)) => tag::run(app, m),
        ("write-tree", Some(m)) => write_tree::run(app, m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}

// Name used when a command's optional commit argument is omitted.
const DEFAULT_NAME: &str = "@";

fn open_repo(app: &App) -> Result<OnDisk> {
    Ok(find_repo::from_path(&app.work_dir)?)
}

// The commit `HEAD` currently resolves to, if any.
fn head_commit(repo: &OnDisk) -> Result<Option<Id>> {
    Ok(repo.resolve_ref(HEAD, true)?.and_then(|r| r.value.id()))
}

// Flattened tree of a commit, or an empty map for "no commit".
fn commit_files(repo: &OnDisk, commit: Option<&Id>) -> Result<BTreeMap<String, Id>> {
    match commit {
        Some(id) => {
            let commit = repo.parse_commit(id)?;
            Ok(repo.read_tree_flat(&commit.tree, "")?)
        }
        None => Ok(BTreeMap::new()),
    }
}

// Map each commit ID to the names of the references that point at it.
fn ref_labels(repo: &OnDisk) -> Result<HashMap<Id, Vec<String>>> {
    let mut labels: HashMap<Id, Vec<String>> = HashMap::new();

    for r in repo.refs(true)? {
        if let Some(id) = r.value.id() {
            labels.entry(id).or_default().push(r.name);
        }
    }

    Ok(labels)
}

fn print_commit(app: &mut App, id: &Id, commit: &Commit, labels: Option<&Vec<String>>) -> Result<()> {
    match labels {
        Some(labels) if !labels.is_empty() => writeln!(app, "commit {} ({})", id, labels.join(", "))?,
        _ => writeln!(app, "commit {}", id)?,
    }

    if let Some(parent) = &commit.parent {
        writeln!(app, "parent {}", parent)?;
    }

    writeln!(app)?;
    for line in commit.message.lines() {
        writeln!(app, "    {}", line)?;
    }
    writeln!(app)?;

    Ok(())
}
