use std::io::Write;

use super::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::on_disk::OnDisk;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty tinygit repository")
        .arg(
            Arg::with_name("directory")
                .help("The directory to create the repository in (default: current directory)"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let path = match args.value_of("directory") {
        Some(dir) => app.work_dir.join(dir),
        None => app.work_dir.clone(),
    };

    let repo = OnDisk::init(&path)?;

    writeln!(
        app,
        "Initialized empty tinygit repository in {}",
        repo.repo_dir().display()
    )?;

    Ok(())
}
