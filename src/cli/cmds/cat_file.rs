use std::io::Write;

use super::{open_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Print the content or kind of a stored object")
        .arg(
            Arg::with_name("t")
                .short("t")
                .help("Show the object kind instead of its content"),
        )
        .arg(
            Arg::with_name("object")
                .required(true)
                .help("Object ID or reference name"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let repo = open_repo(app)?;
    let id = repo.resolve_name(args.value_of("object").unwrap_or_default())?;

    if args.is_present("t") {
        writeln!(app, "{}", repo.get_kind(&id)?)?;
    } else {
        app.write_all(&repo.get(&id, None)?)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cmds::test_support::{commit, run, temp_repo, write_file};
    use crate::App;

    #[test]
    fn prints_content_and_kind() {
        let dir = temp_repo();
        write_file(dir.path(), "a.txt", "hello\n");

        let id = run(dir.path(), &["hash-object", "-w", "a.txt"]);
        let id = id.trim();

        assert_eq!(run(dir.path(), &["cat-file", id]), "hello\n");
        assert_eq!(run(dir.path(), &["cat-file", "-t", id]), "blob\n");
    }

    #[test]
    fn accepts_reference_names() {
        let dir = temp_repo();
        write_file(dir.path(), "a.txt", "hello\n");
        commit(dir.path(), "first");

        assert_eq!(run(dir.path(), &["cat-file", "-t", "@"]), "commit\n");

        let content = run(dir.path(), &["cat-file", "HEAD"]);
        assert!(content.starts_with("tree "));
        assert!(content.ends_with("\n\nfirst\n"));
    }

    #[test]
    fn kind_of_each_object() {
        let dir = temp_repo();
        write_file(dir.path(), "a.txt", "hello\n");
        let c1 = commit(dir.path(), "first");

        let tree = run(dir.path(), &["write-tree"]);
        let blob = run(dir.path(), &["hash-object", "a.txt"]);

        assert_eq!(run(dir.path(), &["cat-file", "-t", &c1]), "commit\n");
        assert_eq!(run(dir.path(), &["cat-file", "-t", tree.trim()]), "tree\n");
        assert_eq!(run(dir.path(), &["cat-file", "-t", blob.trim()]), "blob\n");

        let missing = "be9bfa841874ccc9f2ef7c48d0c76226f89b7189";
        let err = App::run_with_args(dir.path(), vec!["cat-file", "-t", missing]).unwrap_err();
        assert!(err.to_string().contains("not found"), "{}", err);
    }

    #[test]
    fn error_unknown_object() {
        let dir = temp_repo();

        let err = App::run_with_args(dir.path(), vec!["cat-file", "nope"]).unwrap_err();
        assert!(err.to_string().contains("`nope`"), "{}", err);

        let missing = "be9bfa841874ccc9f2ef7c48d0c76226f89b7189";
        let err = App::run_with_args(dir.path(), vec!["cat-file", missing]).unwrap_err();
        assert!(err.to_string().contains("not found"), "{}", err);
    }
}
