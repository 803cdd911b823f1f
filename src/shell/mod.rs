pub use self::shell::Shell;

pub mod execute_command;
pub mod job_control;
mod shell;

/// Number of input lines kept for the `history` builtin unless configured
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;
/// Input lines longer than this many bytes are truncated
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// Policy object to control a Shell's behavior
#[derive(Debug, Copy, Clone)]
pub struct ShellConfig {
    /// Number of entries to store in the shell's command history
    command_history_capacity: usize,

    /// Input lines are truncated to this many bytes.
    max_line_length: usize,

    /// Determines if the prompt and some messages (e.g. "exit") are displayed.
    display_messages: bool,
}

impl ShellConfig {
    /// Creates an interactive shell
    ///
    /// # Complete List
    /// - Command History keeps `command_history_capacity` lines
    /// - The prompt is displayed before each line
    /// - "exit" is displayed when input ends
    pub fn interactive(command_history_capacity: usize) -> ShellConfig {
        ShellConfig {
            command_history_capacity,
            display_messages: true,
            ..Default::default()
        }
    }

    /// Creates a noninteractive shell, e.g. for a script or `-c`
    ///
    /// Command history is still recorded so the history builtin works, but
    /// no prompt or additional messages are displayed.
    pub fn noninteractive() -> ShellConfig {
        Default::default()
    }

    /// Sets the number of lines kept by the command history.
    pub fn with_history_capacity(self, command_history_capacity: usize) -> ShellConfig {
        ShellConfig {
            command_history_capacity,
            ..self
        }
    }

    /// Sets the length, in bytes, input lines are truncated to.
    pub fn with_max_line_length(self, max_line_length: usize) -> ShellConfig {
        ShellConfig {
            max_line_length,
            ..self
        }
    }
}

impl Default for ShellConfig {
    fn default() -> ShellConfig {
        ShellConfig {
            command_history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            display_messages: false,
        }
    }
}
