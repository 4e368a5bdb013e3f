use super::{open_repo, print_commit, ref_labels, App, Result, DEFAULT_NAME};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("log")
        .about("Show commit history")
        .arg(Arg::with_name("name").help("Commit to start from (default: HEAD)"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let repo = open_repo(app)?;
    let start = repo.resolve_name(args.value_of("name").unwrap_or(DEFAULT_NAME))?;
    let labels = ref_labels(&repo)?;

    for id in repo.ancestors(vec![start]) {
        let id = id?;
        let commit = repo.parse_commit(&id)?;
        print_commit(app, &id, &commit, labels.get(&id))?;
    }

    Ok(())
}
