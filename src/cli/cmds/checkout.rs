use std::io::Write;

use super::{open_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("checkout")
        .about("Switch the working directory to a branch or commit")
        .arg(
            Arg::with_name("name")
                .required(true)
                .help("Branch, tag, or commit ID"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let mut repo = open_repo(app)?;
    let id = repo.checkout(args.value_of("name").unwrap_or_default())?;

    match repo.current_branch()? {
        Some(branch) => writeln!(app, "Switched to branch {}", branch)?,
        None => writeln!(app, "HEAD is now at {}", id)?,
    }

    Ok(())
}
