use std::io::Write;

use super::{commit_files, head_commit, open_repo, App, Result};

use clap::{ArgMatches, SubCommand};
use tinygit::diff;
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("status").about("Show the current branch and uncommitted changes")
}

pub(crate) fn run(app: &mut App, _args: &ArgMatches) -> Result<()> {
    let repo = open_repo(app)?;
    let head = head_commit(&repo)?;

    match (repo.current_branch()?, head) {
        (Some(branch), _) => writeln!(app, "On branch {}", branch)?,
        (None, Some(id)) => writeln!(app, "HEAD detached at {}", id)?,
        (None, None) => writeln!(app, "No commits yet")?,
    }

    let committed = commit_files(&repo, head.as_ref())?;
    let changes = diff::changed_files(&committed, &repo.working_tree()?);

    if !changes.is_empty() {
        writeln!(app, "\nChanges to be committed:\n")?;
        for (path, change) in changes {
            writeln!(app, "{:>12}: {}", change.as_str(), path)?;
        }
    }

    Ok(())
}
