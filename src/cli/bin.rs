use std::{
    env,
    error::Error,
    io::{self, Write},
};

use tracing_subscriber::EnvFilter;

mod app;
pub(crate) use app::App;

mod cmds;
mod find_repo;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

const LOG_ENV_VAR: &str = "TINYGIT_LOG";

// Log output goes to stderr so that stdout carries only command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[allow(unused_must_use)]
#[cfg(not(tarpaulin_include))]
fn main() {
    // Kept as small as possible; everything else is reachable from the
    // in-process tests via `App::run_with_args`.

    init_tracing();

    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let r = match env::current_dir() {
        Ok(work_dir) => {
            let mut app = App {
                arg_matches: app::clap_app().get_matches(),
                work_dir,
                stdin: &mut stdin,
                stdout: &mut stdout,
            };

            let r = app.run();

            app.flush();
            // Intentionally ignoring the result of this flush.

            r
        }
        Err(err) => Err(err.into()),
    };

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            1
        }
    });
}
