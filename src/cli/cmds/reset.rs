use super::{open_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("reset")
        .about("Move the current branch (or detached HEAD) without touching files")
        .arg(
            Arg::with_name("name")
                .required(true)
                .help("Commit to move to"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let mut repo = open_repo(app)?;
    let id = repo.resolve_name(args.value_of("name").unwrap_or_default())?;

    repo.reset(&id)?;
    Ok(())
}
