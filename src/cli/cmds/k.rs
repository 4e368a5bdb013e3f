use std::io::Write;

use super::{open_repo, App, Result};

use clap::{ArgMatches, SubCommand};
use tinygit::repo::{RefValue, Repo};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("k")
        .about("Print the reference and commit graph in Graphviz dot format")
}

pub(crate) fn run(app: &mut App, _args: &ArgMatches) -> Result<()> {
    let repo = open_repo(app)?;
    let mut starts = Vec::new();

    writeln!(app, "digraph commits {{")?;

    for r in repo.refs(false)? {
        writeln!(app, "  \"{}\" [shape=note]", r.name)?;
        match r.value {
            RefValue::Direct(id) => {
                writeln!(app, "  \"{}\" -> \"{}\"", r.name, id)?;
                starts.push(id);
            }
            RefValue::Symbolic(target) => writeln!(app, "  \"{}\" -> \"{}\"", r.name, target)?,
        }
    }

    for id in repo.ancestors(starts) {
        let id = id?;
        let commit = repo.parse_commit(&id)?;
        let short = id.to_string();

        writeln!(
            app,
            "  \"{}\" [shape=box style=filled label=\"{}\"]",
            id,
            &short[..10]
        )?;
        if let Some(parent) = commit.parent {
            writeln!(app, "  \"{}\" -> \"{}\"", id, parent)?;
        }
    }

    writeln!(app, "}}")?;
    Ok(())
}
