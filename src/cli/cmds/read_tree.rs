use super::{open_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("read-tree")
        .about("Replace the working directory with the contents of a tree")
        .arg(
            Arg::with_name("tree")
                .required(true)
                .help("Tree ID or name"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let mut repo = open_repo(app)?;
    let id = repo.resolve_name(args.value_of("tree").unwrap_or_default())?;

    repo.materialize(&id)?;
    Ok(())
}
