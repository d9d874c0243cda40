use std::{
    ffi::{OsStr, OsString},
    io::Write,
    path::{Path, PathBuf},
};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use tracing::debug;

use crate::{BoardFinder, DEFAULT_BOARD_REGEX, DEFAULT_DEVICE_DIR, Error, Makefile, MakefileVars};

// The first argument must name a subcommand, so there is no top-level help
// or version flag.
#[derive(Parser, Debug)]
#[command(
    author,
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn debug(&self) -> bool {
        match &self.command {
            Command::Makefile { logging } | Command::FindBoard { logging, .. } => logging.debug,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print a Makefile that builds and uploads the sketch in the current directory
    Makefile {
        #[command(flatten)]
        logging: Logging,
    },
    /// Print the path of the single connected board
    FindBoard {
        #[arg(long, default_value = DEFAULT_BOARD_REGEX)]
        /// Regex that matches the name the board appears under in the device directory
        regex: String,
        #[arg(long, default_value = DEFAULT_DEVICE_DIR)]
        /// Directory to look for the board in
        dir: PathBuf,
        #[command(flatten)]
        logging: Logging,
    },
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct Logging {
    #[arg(long, short = 'D')]
    /// Log diagnostics to stderr
    pub debug: bool,
}

/// Parses a full argument list, `argv[0]` included.
pub fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// The process exit code for a failed parse.
///
/// Only a subcommand's `--help` is not a failure.
pub fn exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp => 0,
        _ => 1,
    }
}

/// Whether a failed parse should be followed by the full help, so the user
/// sees which subcommands exist.
pub fn needs_help(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::InvalidSubcommand | ErrorKind::MissingSubcommand | ErrorKind::UnknownArgument
    )
}

pub fn help() -> String {
    Cli::command().render_help().to_string()
}

/// The name the tool was invoked as, without its directory.
pub fn executable_name(arg0: Option<&OsStr>) -> String {
    arg0.map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").into())
}

/// Runs the selected subcommand, writing its result to `out`.
pub fn run(cli: Cli, executable: &str, template: &str, mut out: impl Write) -> Result<(), Error> {
    debug!(command = ?cli.command, executable);

    match cli.command {
        Command::Makefile { .. } => {
            let vars = MakefileVars {
                executable,
                default_regex: DEFAULT_BOARD_REGEX,
            };
            Makefile::new(template).write_to(&vars, out)
        }
        Command::FindBoard { regex, dir, .. } => {
            let board = BoardFinder::new(dir, &regex)?.find()?;
            writeln!(out, "{}", board.display())?;
            Ok(())
        }
    }
}
