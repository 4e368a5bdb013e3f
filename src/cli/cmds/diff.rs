use std::io::Write;

use super::{commit_files, head_commit, open_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::diff;
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("diff")
        .about("Show changes between a commit and the working directory")
        .arg(Arg::with_name("name").help("Commit to compare against (default: HEAD)"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let mut repo = open_repo(app)?;

    let base = match args.value_of("name") {
        Some(name) => Some(repo.resolve_name(name)?),
        None => head_commit(&repo)?,
    };
    let before = commit_files(&repo, base.as_ref())?;

    // The working files have to be stored for the diff to read them.
    let tree = repo.write_tree()?;
    let after = repo.read_tree_flat(&tree, "")?;

    app.write_all(&diff::diff_trees(&repo, &before, &after)?)?;
    Ok(())
}
