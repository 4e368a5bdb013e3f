use super::{open_repo, App, Result, DEFAULT_NAME};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("tag")
        .about("Create or move a tag")
        .arg(Arg::with_name("name").required(true).help("Tag name"))
        .arg(Arg::with_name("target").help("Object to tag (default: HEAD)"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let mut repo = open_repo(app)?;
    let id = repo.resolve_name(args.value_of("target").unwrap_or(DEFAULT_NAME))?;

    repo.create_tag(args.value_of("name").unwrap_or_default(), &id)?;
    Ok(())
}
