use std::io::Write;

use super::{commit_files, open_repo, print_commit, ref_labels, App, Result, DEFAULT_NAME};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::diff;
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("show")
        .about("Show a commit and the changes it introduced")
        .arg(Arg::with_name("name").help("Commit to show (default: HEAD)"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let repo = open_repo(app)?;
    let id = repo.resolve_name(args.value_of("name").unwrap_or(DEFAULT_NAME))?;
    let commit = repo.parse_commit(&id)?;

    let labels = ref_labels(&repo)?;
    print_commit(app, &id, &commit, labels.get(&id))?;

    let before = commit_files(&repo, commit.parent.as_ref())?;
    let after = repo.read_tree_flat(&commit.tree, "")?;

    app.write_all(&diff::diff_trees(&repo, &before, &after)?)?;
    Ok(())
}
