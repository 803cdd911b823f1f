use std::io::Write;

use crate::builtins::{self, BuiltinCommand};
use crate::errors::Result;
use crate::parse::Command;
use crate::shell::Shell;

pub struct Exit;

impl BuiltinCommand for Exit {
    const NAME: &'static str = builtins::EXIT_NAME;

    /// Background jobs still running are left behind.
    fn run(shell: &mut Shell, _command: &Command, _stdout: &mut dyn Write) -> Result<()> {
        if shell.job_manager().has_jobs() {
            info!(
                "exiting with {} background job(s) still running",
                shell.job_manager().get_jobs().len()
            );
        }
        shell.request_exit();
        Ok(())
    }
}
