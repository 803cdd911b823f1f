//! Jobsh builtins
//!
//! This module includes the implementations of the shell builtin commands.

use std::io::{self, Write};

use crate::errors::Result;
use crate::parse::Command;
use crate::shell::{execute_command, Shell};

use self::dirs::Cd;
use self::echo::Echo;
use self::exit::Exit;
use self::history::History;
use self::jobs::Jobs;

mod dirs;
mod echo;
mod exit;
mod history;
mod jobs;

const CD_NAME: &str = "cd";
const ECHO_NAME: &str = "echo";
const EXIT_NAME: &str = "exit";
const HISTORY_NAME: &str = "history";
const JOBS_NAME: &str = "jobs";

/// Represents a Jobsh builtin command such as cd or jobs.
pub trait BuiltinCommand {
    /// The NAME of the command.
    const NAME: &'static str;
    /// Runs the command in the `shell` environment, writing its output to `stdout`.
    fn run(shell: &mut Shell, command: &Command, stdout: &mut dyn Write) -> Result<()>;
}

pub fn is_builtin(program: &str) -> bool {
    [CD_NAME, ECHO_NAME, EXIT_NAME, HISTORY_NAME, JOBS_NAME].contains(&program)
}

/// precondition: command is a builtin.
///
/// Output goes to the command's `>` file when one is given, or to the
/// shell's stdout otherwise. `<` is ignored, no builtin reads stdin.
pub fn run(shell: &mut Shell, command: &Command) -> Result<()> {
    assert!(is_builtin(command.program()));

    let mut file;
    let mut stdout = io::stdout();
    let output: &mut dyn Write = match command.outfile {
        Some(ref outfile) => match execute_command::open_outfile(outfile) {
            Ok(f) => {
                file = f;
                &mut file
            }
            Err(e) => {
                eprintln!("[ERROR]: {}: {}", outfile, e);
                &mut stdout
            }
        },
        None => &mut stdout,
    };

    let result = match command.program() {
        Cd::NAME => Cd::run(shell, command, output),
        Echo::NAME => Echo::run(shell, command, output),
        Exit::NAME => Exit::run(shell, command, output),
        History::NAME => History::run(shell, command, output),
        Jobs::NAME => Jobs::run(shell, command, output),
        _ => unreachable!(),
    };
    output.flush()?;
    result
}
