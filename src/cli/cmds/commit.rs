use std::io::Write;

use super::{open_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("commit")
        .about("Record a snapshot of the working directory")
        .arg(
            Arg::with_name("message")
                .short("m")
                .long("message")
                .value_name("msg")
                .required(true)
                .help("The commit message"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let mut repo = open_repo(app)?;
    let id = repo.commit(args.value_of("message").unwrap_or_default())?;

    writeln!(app, "{}", id)?;
    Ok(())
}
