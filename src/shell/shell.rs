//! Jobsh - Shell Module
//!
//! The Shell drives the command loop: it owns the command history and the
//! background job table, and runs every input line through the same
//! iteration whether it came from the line editor, `-c` or a script file.

use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::builtins;
use crate::editor::{self, Editor};
use crate::errors::{Error, ErrorKind, Result, ResultExt};
use crate::history::HistoryState;
use crate::parse::Command;
use crate::shell::{execute_command, job_control::JobManager, ShellConfig};

/// Jobsh Shell
#[derive(Debug)]
pub struct Shell {
    history: HistoryState,
    job_manager: JobManager,
    config: ShellConfig,
    /// Set by the exit builtin.
    finished: bool,
}

impl Shell {
    /// Constructs a new Shell to manage running jobs and command history.
    pub fn new(config: ShellConfig) -> Shell {
        info!("jobsh started up");
        Shell {
            history: HistoryState::with_capacity(config.command_history_capacity),
            job_manager: Default::default(),
            config,
            finished: false,
        }
    }

    /// Runs lines read by `editor` until end of input or `exit`.
    pub fn execute_from_editor(&mut self, editor: &mut Editor) -> Result<()> {
        while !self.finished {
            let prompt = if self.config.display_messages {
                self.prompt_string()
            } else {
                String::new()
            };

            match editor.readline(&prompt)? {
                Some(line) => self.execute_command_string(&line)?,
                None => {
                    if self.config.display_messages {
                        println!("exit");
                    }
                    break;
                }
            }
        }

        info!("jobsh read {} lines", editor.line_count());
        Ok(())
    }

    /// Runs one input line through a full iteration of the command loop.
    ///
    /// Syntax errors and failed commands are reported and the shell carries
    /// on; only fatal errors are returned.
    pub fn execute_command_string(&mut self, input: &str) -> Result<()> {
        let line = truncate_line(input.trim_end_matches('\n'), self.config.max_line_length);
        self.history.record(&format!("{}\n", line));

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(Error(ErrorKind::Syntax(message), _)) => {
                println!("[ERROR]: {}", message);
                None
            }
            Err(e) => return Err(e),
        };

        // discarded lines get no further processing
        let command = match command {
            Some(command) => command,
            None => return Ok(()),
        };

        if command.background {
            self.job_manager.create_job(&command.input);
        }

        let temp_result = self.job_manager.do_job_notification(&mut io::stdout());
        log_if_err!(temp_result, "do_job_notification");

        self.dispatch(command)
    }

    /// Runs each line of the script at `path`, stopping early on `exit`.
    pub fn execute_commands_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).chain_err(|| format!("{}: unable to open", path.display()))?;
        let mut reader = BufReader::new(file);

        while !self.finished {
            match editor::read_line_lossy(&mut reader)? {
                Some(line) => self.execute_command_string(&line)?,
                None => break,
            }
        }

        Ok(())
    }

    /// Returns `true` once the exit builtin has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn request_exit(&mut self) {
        self.finished = true;
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    pub fn job_manager(&self) -> &JobManager {
        &self.job_manager
    }

    /// Custom prompt to output to the user.
    pub fn prompt_string(&self) -> String {
        let user = env::var("USER").ok();
        let cwd = env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        format_prompt(user.as_deref(), &cwd)
    }

    /// Runs a parsed command, as a builtin or in a new process.
    fn dispatch(&mut self, mut command: Command) -> Result<()> {
        if builtins::is_builtin(command.program()) {
            // builtins always run in the shell itself
            if command.background {
                self.job_manager.discard_pending();
            }
            if let Err(e) = builtins::run(self, &command) {
                report_error(&e);
            }
            return Ok(());
        }

        execute_command::resolve_program(&mut command);
        let pid = match execute_command::launch(&command) {
            Ok(pid) => pid,
            Err(e) => {
                if command.background {
                    self.job_manager.discard_pending();
                }
                if e.is_fatal() {
                    return Err(e);
                }
                report_error(&e);
                return Ok(());
            }
        };

        if command.background {
            match self.job_manager.attach_process(pid) {
                Some(job_id) => println!("[{}] {}", job_id, pid),
                None => warn!("no pending job for background process {}", pid),
            }
        } else {
            let temp_result = execute_command::wait_for_process(pid);
            log_if_err!(temp_result, "wait_for_process({})", pid);
        }

        Ok(())
    }
}

/// Shortens `line` to at most `max_len` bytes without splitting a character.
fn truncate_line(line: &str, max_len: usize) -> &str {
    if line.len() <= max_len {
        return line;
    }

    let mut end = max_len;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    warn!("input line of {} bytes truncated to {}", line.len(), end);
    &line[..end]
}

fn format_prompt(user: Option<&str>, cwd: &str) -> String {
    match user {
        Some(user) => format!("\n{}@jobsh:{}> ", user, cwd),
        None => format!("\njobsh:{}> ", cwd),
    }
}

/// Writes `error` and its causes on one line to stderr.
fn report_error(error: &Error) {
    let causes: Vec<String> = error.iter().map(|e| e.to_string()).collect();
    error!("{}", causes.join(": "));
    eprintln!("[ERROR]: {}", causes.join(": "));
}
