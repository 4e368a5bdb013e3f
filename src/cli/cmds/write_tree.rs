use std::io::Write;

use super::{open_repo, App, Result};

use clap::{ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("write-tree").about("Store the working directory as a tree object")
}

pub(crate) fn run(app: &mut App, _args: &ArgMatches) -> Result<()> {
    let mut repo = open_repo(app)?;
    let id = repo.write_tree()?;

    writeln!(app, "{}", id)?;
    Ok(())
}
