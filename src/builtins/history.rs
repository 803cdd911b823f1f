use std::io::Write;

use crate::builtins::{self, BuiltinCommand};
use crate::errors::Result;
use crate::parse::Command;
use crate::shell::Shell;

pub struct History;

impl BuiltinCommand for History {
    const NAME: &'static str = builtins::HISTORY_NAME;

    fn run(shell: &mut Shell, _command: &Command, stdout: &mut dyn Write) -> Result<()> {
        write!(stdout, "{}", shell.history())?;
        Ok(())
    }
}
