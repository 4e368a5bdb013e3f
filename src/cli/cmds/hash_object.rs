use std::fs;
use std::io::Write;

use super::{open_repo, App, Result};

use clap::{Arg, ArgMatches, Error, ErrorKind, SubCommand};
use tinygit::object::{Kind, Object};
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute object ID and optionally create an object from a file")
        .arg(
            Arg::with_name("t")
                .short("t")
                .value_name("type")
                .help("Specify the type (default 'blob')"),
        )
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read the object from standard input instead of from a file"),
        )
        .arg(Arg::with_name("file"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let kind = match args.value_of("t") {
        Some(t) => t.parse::<Kind>()?,
        None => Kind::Blob,
    };

    let content = content_from_args(app, args)?;

    let id = if args.is_present("w") {
        let mut repo = open_repo(app)?;
        repo.put(kind, content)?
    } else {
        Object::hash(kind, &content)
    };

    writeln!(app, "{}", id)?;

    Ok(())
}

fn content_from_args(app: &mut App, args: &ArgMatches) -> Result<Vec<u8>> {
    match (args.is_present("stdin"), args.value_of("file")) {
        (false, Some(file)) => Ok(fs::read(app.work_dir.join(file))?),
        (true, None) => {
            let mut content = Vec::new();
            app.stdin.read_to_end(&mut content)?;
            Ok(content)
        }
        _ => Err(Box::new(Error::with_description(
            "content source must be either --stdin or a file path",
            ErrorKind::MissingRequiredArgument,
        ))),
    }
}
