use std::env;
use std::io::Write;

use crate::builtins::{self, BuiltinCommand};
use crate::errors::{Error, Result, ResultExt};
use crate::parse::Command;
use crate::shell::Shell;

pub struct Cd;

impl BuiltinCommand for Cd {
    const NAME: &'static str = builtins::CD_NAME;

    fn run(_shell: &mut Shell, command: &Command, stdout: &mut dyn Write) -> Result<()> {
        let dir = match command.args() {
            [] => env::var_os("HOME").ok_or_else(|| Error::builtin_command("cd: HOME not set"))?,
            [dir] if dir.is_empty() && command.undefined_variable.is_some() => {
                if let Some(ref name) = command.undefined_variable {
                    writeln!(stdout, "{}: Undefined variable.", name)?;
                }
                return Ok(());
            }
            [dir] => dir.into(),
            args => {
                writeln!(stdout, "[ERROR] too many arguments: {}", args.len())?;
                return Ok(());
            }
        };

        debug!("changing directory to {:?}", dir);
        env::set_current_dir(&dir).chain_err(|| format!("cd: {}", dir.to_string_lossy()))?;
        Ok(())
    }
}
