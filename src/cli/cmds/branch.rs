use std::io::Write;

use super::{open_repo, App, Result, DEFAULT_NAME};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("branch")
        .about("List branches, or create one")
        .arg(Arg::with_name("name").help("Name of the branch to create"))
        .arg(
            Arg::with_name("start")
                .requires("name")
                .help("Where the new branch starts (default: HEAD)"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    match args.value_of("name") {
        Some(name) => create(app, name, args.value_of("start").unwrap_or(DEFAULT_NAME)),
        None => list(app),
    }
}

fn create(app: &mut App, name: &str, start: &str) -> Result<()> {
    let mut repo = open_repo(app)?;
    let id = repo.resolve_name(start)?;

    repo.create_branch(name, &id)?;

    writeln!(app, "Branch {} created at {}", name, id)?;
    Ok(())
}

fn list(app: &mut App) -> Result<()> {
    let repo = open_repo(app)?;
    let current = repo.current_branch()?;

    for branch in repo.branch_names()? {
        let marker = if current.as_ref() == Some(&branch) { "*" } else { " " };
        writeln!(app, "{} {}", marker, branch)?;
    }

    Ok(())
}
