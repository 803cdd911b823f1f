use std::io::Write;

use crate::builtins::{self, BuiltinCommand};
use crate::errors::Result;
use crate::parse::Command;
use crate::shell::Shell;

pub struct Echo;

impl BuiltinCommand for Echo {
    const NAME: &'static str = builtins::ECHO_NAME;

    /// Writes each argument followed by a space, without a final newline.
    /// A line with an undefined variable only gets the variable's message.
    fn run(_shell: &mut Shell, command: &Command, stdout: &mut dyn Write) -> Result<()> {
        if let Some(ref name) = command.undefined_variable {
            write!(stdout, "{}: Undefined variable.", name)?;
            return Ok(());
        }

        for arg in command.args() {
            write!(stdout, "{} ", arg)?;
        }
        Ok(())
    }
}
