#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use std::path::PathBuf;
use std::process;

use docopt::Docopt;
use error_chain::bail;
use nix::unistd::Pid;

use jobsh::errors::*;
use jobsh::{Editor, Shell, ShellConfig};

const LOG_FILE_NAME: &str = ".jobsh_log";
const FAILURE_EXIT_STATUS: i32 = 1;

const USAGE: &str = "
jobsh.

Usage:
    jobsh [options]
    jobsh [options] -c <command>
    jobsh [options] <file>
    jobsh (-h | --help)
    jobsh --version

Options:
    -h --help               Show this screen.
    --version               Show version.
    -c                      Execute <command> as a single input line and exit.
    --history-size=<n>      Number of input lines kept for `history` [default: 100].
    --log=<path>            File to write log to, defaults to ~/.jobsh_log
";

/// Docopts input arguments.
#[derive(Debug, Deserialize)]
struct Args {
    arg_command: Option<String>,
    arg_file: Option<String>,
    flag_version: bool,
    flag_c: bool,
    flag_history_size: usize,
    flag_log: Option<String>,
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if let Err(e) = init_logger(&args.flag_log) {
        eprintln!("jobsh: unable to start logging: {}", e);
    }
    debug!("{:?}", args);

    if args.flag_version {
        println!("jobsh version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = if args.flag_c || args.arg_file.is_some() {
        execute_from_command_string_or_file(&args)
    } else {
        execute_from_stdin(&args)
    };

    if let Err(e) = result {
        error!("jobsh exiting after fatal error: {}", e);
        eprintln!("[ERROR]: {}", e);
        process::exit(FAILURE_EXIT_STATUS);
    }
    info!("jobsh has shut down");
}

fn init_logger(path: &Option<String>) -> Result<()> {
    let log_path = match path.clone().map(PathBuf::from).or_else(default_log_path) {
        Some(log_path) => log_path,
        None => bail!("unable to get home directory"),
    };

    let pid = Pid::this();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                pid,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&log_path).chain_err(|| format!("{}", log_path.display()))?)
        .apply()?;

    Ok(())
}

fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOG_FILE_NAME))
}

fn execute_from_command_string_or_file(args: &Args) -> Result<()> {
    let shell_config = ShellConfig::noninteractive().with_history_capacity(args.flag_history_size);
    let mut shell = Shell::new(shell_config);

    if let Some(ref command) = args.arg_command {
        shell.execute_command_string(command)
    } else if let Some(ref file_path) = args.arg_file {
        shell.execute_commands_from_file(file_path)
    } else {
        unreachable!();
    }
}

fn execute_from_stdin(args: &Args) -> Result<()> {
    let shell_config = ShellConfig::interactive(args.flag_history_size);
    let mut shell = Shell::new(shell_config);
    let mut editor = Editor::new()?;
    shell.execute_from_editor(&mut editor)
}
