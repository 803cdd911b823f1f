use std::io::Write;

use crate::builtins::{self, BuiltinCommand};
use crate::errors::Result;
use crate::parse::Command;
use crate::shell::Shell;

pub struct Jobs;

impl BuiltinCommand for Jobs {
    const NAME: &'static str = builtins::JOBS_NAME;

    fn run(shell: &mut Shell, _command: &Command, stdout: &mut dyn Write) -> Result<()> {
        for job in shell.job_manager().get_jobs() {
            writeln!(stdout, "{}", job)?;
        }

        Ok(())
    }
}
