//! Line reading for the interactive shell.

use std::fmt;
use std::io::{self, BufRead, IsTerminal, StdinLock};

use rustyline::{self, error::ReadlineError, history::DefaultHistory, Config};

use crate::errors::Result;

/// Reads input lines, with line editing when stdin is a terminal.
///
/// When stdin is a pipe or a file no prompt is written and lines are read
/// as raw bytes, exactly as `execute_commands_from_file` reads a script.
pub struct Editor {
    input: Input,
    /// The total number of lines handed out
    line_count: usize,
}

enum Input {
    Terminal(rustyline::Editor<(), DefaultHistory>),
    Stream(StdinLock<'static>),
}

impl Editor {
    pub fn new() -> Result<Editor> {
        let input = if io::stdin().is_terminal() {
            let config = Config::builder()
                .auto_add_history(false)
                .history_ignore_space(true)
                .build();
            Input::Terminal(rustyline::Editor::with_config(config)?)
        } else {
            debug!("stdin is not a terminal, reading lines directly");
            Input::Stream(io::stdin().lock())
        };

        Ok(Editor {
            input,
            line_count: 0,
        })
    }

    /// Reads one line, returning it with its `\n` terminator.
    ///
    /// Returns `None` when end of file is reached. An interrupted read
    /// (`Ctrl-C`) and a line that is not valid UTF-8 at the terminal yield a
    /// blank line.
    pub fn readline(&mut self, prompt: &str) -> Result<Option<String>> {
        let line = match self.input {
            Input::Terminal(ref mut editor) => match editor.readline(prompt) {
                Ok(mut line) => {
                    let temp_result = editor.add_history_entry(line.as_str());
                    log_if_err!(temp_result, "add_history_entry");
                    line.push('\n');
                    Some(line)
                }
                Err(ReadlineError::Eof) => None,
                Err(ReadlineError::Interrupted) => Some(String::from("\n")),
                Err(e @ ReadlineError::Utf8Error) => {
                    warn!("discarding terminal input: {}", e);
                    eprintln!("[ERROR]: {}", e);
                    Some(String::from("\n"))
                }
                Err(e) => return Err(e.into()),
            },
            Input::Stream(ref mut reader) => read_line_lossy(reader)?,
        };

        if line.is_some() {
            self.line_count += 1;
        }
        Ok(line)
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "lines read: {}", self.line_count)
    }
}

/// Reads up to and including the next `\n`, replacing invalid UTF-8 with
/// U+FFFD. Line terminators, `\r` included, are kept as read.
///
/// Returns `None` at end of input.
pub fn read_line_lossy<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    let line = match String::from_utf8(buf) {
        Ok(line) => line,
        Err(e) => {
            warn!("input line is not valid UTF-8: {}", e);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn read_all(input: &[u8]) -> Vec<String> {
        let mut reader = Cursor::new(input);
        let mut lines = Vec::new();
        while let Some(line) = read_line_lossy(&mut reader).unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn lines_keep_terminators() {
        assert_eq!(read_all(b"echo a\r\n\nlast"), vec!["echo a\r\n", "\n", "last"]);
        assert!(read_all(b"").is_empty());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(
            read_all(b"echo \xff\necho after\n"),
            vec!["echo \u{FFFD}\n", "echo after\n"]
        );
    }
}
