//! Jobsh Parser
//!
//! A line is split on whitespace and every word is classified by its first
//! character: `$NAME` expands to the variable's value, `<` and `>` take the
//! next word as a redirection target, a trailing `&` sends the command to the
//! background, and anything else is a literal argument.

use std::str::SplitWhitespace;

use crate::errors::{Error, Result};
use crate::variable_expansion;

/// Maximum number of arguments, command name included, accepted on one line.
pub const MAX_ARGUMENTS: usize = 64;

/// Represents all information associated with one user input line.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    /// Command line without its line terminator, used for job messages
    pub input: String,
    /// The program followed by its arguments, variables already expanded
    pub argv: Vec<String>,
    /// The name of the input file, if one is specified
    pub infile: Option<String>,
    /// The file to write stdout to, if one is specified
    pub outfile: Option<String>,
    /// Run the command in the background, defaults to false
    pub background: bool,
    /// Name of the last `$NAME` on the line that was not set
    pub undefined_variable: Option<String>,
}

impl Command {
    /// Parses `input`, expanding variables from the process environment.
    ///
    /// Returns `Ok(None)` for a blank line.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobsh::parse::Command;
    ///
    /// let command = Command::parse("sort < names.txt > sorted.txt &\n").unwrap().unwrap();
    /// assert_eq!(command.input, "sort < names.txt > sorted.txt &");
    /// assert_eq!(command.argv, vec!["sort"]);
    /// assert_eq!(command.infile.as_deref(), Some("names.txt"));
    /// assert_eq!(command.outfile.as_deref(), Some("sorted.txt"));
    /// assert!(command.background);
    /// ```
    pub fn parse(input: &str) -> Result<Option<Command>> {
        Command::parse_with(input, variable_expansion::resolve)
    }

    /// Parses `input`, resolving `$NAME` words with `lookup`.
    pub fn parse_with<F>(input: &str, lookup: F) -> Result<Option<Command>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let line = input.trim_end_matches(|c| c == '\n' || c == '\r');
        if line.trim().is_empty() {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let mut command = CommandBuilder::new(line);

        while let Some(word) = words.next() {
            if let Some(name) = variable_expansion::variable_name(word) {
                match lookup(name) {
                    Some(value) => command.arg(&value),
                    None => command.arg("").undefined_variable(name),
                };
            } else if word.starts_with('<') {
                command.infile(&redirect_target(word, &mut words)?);
            } else if word.starts_with('>') {
                command.outfile(&redirect_target(word, &mut words)?);
            } else if word.starts_with('&') {
                if words.next().is_some() {
                    return Err(Error::syntax("invalid arguments"));
                }
                command.background(true);
            } else {
                command.arg(word);
            }

            if command.argc() > MAX_ARGUMENTS {
                return Err(Error::syntax("too many arguments"));
            }
        }

        if command.argc() == 0 {
            return Err(Error::syntax("invalid null command"));
        }

        Ok(Some(command.build()))
    }

    /// The command name, e.g. `ls` or `/bin/ls`.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// The arguments following the command name.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }
}

/// Returns the target of the redirection operator starting `word`.
///
/// The target is either attached (`<in`) or the following word (`< in`).
fn redirect_target(word: &str, words: &mut SplitWhitespace<'_>) -> Result<String> {
    let attached = &word[1..];
    if !attached.is_empty() {
        return Ok(attached.to_string());
    }

    words
        .next()
        .map(str::to_string)
        .ok_or_else(|| Error::syntax(format!("missing argument after {}", &word[..1])))
}

/// Builds a `Command`.
#[derive(Debug)]
pub struct CommandBuilder {
    input: String,
    argv: Vec<String>,
    infile: Option<String>,
    outfile: Option<String>,
    background: bool,
    undefined_variable: Option<String>,
}

impl CommandBuilder {
    /// Construct a new `CommandBuilder` for the line `input`, with the following default
    /// configuration:
    ///
    /// * No arguments
    /// * No input/output redirection
    /// * Runs in foreground
    pub fn new(input: &str) -> CommandBuilder {
        CommandBuilder {
            input: String::from(input),
            argv: Vec::new(),
            infile: None,
            outfile: None,
            background: false,
            undefined_variable: None,
        }
    }

    /// Add an argument; the first one is the program.
    pub fn arg(&mut self, arg: &str) -> &mut CommandBuilder {
        self.argv.push(String::from(arg));
        self
    }

    /// Add several arguments.
    pub fn args(&mut self, args: &[&str]) -> &mut CommandBuilder {
        for arg in args {
            self.arg(arg);
        }
        self
    }

    /// Add input redirection from the specified filename.
    pub fn infile(&mut self, filename: &str) -> &mut CommandBuilder {
        self.infile = Some(String::from(filename));
        self
    }

    /// Add output redirection to the specified filename.
    pub fn outfile(&mut self, filename: &str) -> &mut CommandBuilder {
        self.outfile = Some(String::from(filename));
        self
    }

    /// Configure the command to run in the background.
    pub fn background(&mut self, background: bool) -> &mut CommandBuilder {
        self.background = background;
        self
    }

    /// Remember `name` as undefined, replacing any earlier one.
    pub fn undefined_variable(&mut self, name: &str) -> &mut CommandBuilder {
        self.undefined_variable = Some(String::from(name));
        self
    }

    fn argc(&self) -> usize {
        self.argv.len()
    }

    /// Build the final command.
    pub fn build(self) -> Command {
        Command {
            input: self.input,
            argv: self.argv,
            infile: self.infile,
            outfile: self.outfile,
            background: self.background,
            undefined_variable: self.undefined_variable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::errors::ErrorKind;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/bob".to_string()),
            "EMPTY" => Some(String::new()),
            _ => None,
        }
    }

    fn parse(input: &str) -> Result<Option<Command>> {
        Command::parse_with(input, lookup)
    }

    fn syntax_message(input: &str) -> String {
        match parse(input) {
            Err(Error(ErrorKind::Syntax(message), _)) => message,
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn empty() {
        assert!(parse("").unwrap().is_none());
        assert!(parse("\n").unwrap().is_none());
        assert!(parse(" \t \n").unwrap().is_none());
    }

    #[test]
    fn single_cmd() {
        let input = "cmd";
        let mut command = CommandBuilder::new(input);
        command.arg("cmd");
        assert_eq!(command.build(), parse(input).unwrap().unwrap());
    }

    #[test]
    fn single_cmd_with_args() {
        let input = "cmd var1 var2 var3\n";
        let mut command = CommandBuilder::new("cmd var1 var2 var3");
        command.args(&["cmd", "var1", "var2", "var3"]);
        assert_eq!(command.build(), parse(input).unwrap().unwrap());
    }

    #[test]
    fn mixed_whitespace() {
        let command = parse("  cmd\targ1 \x0b arg2\r\n").unwrap().unwrap();
        assert_eq!(command.argv, vec!["cmd", "arg1", "arg2"]);
    }

    #[test]
    fn variable_expansion() {
        let command = parse("echo $HOME $EMPTY").unwrap().unwrap();
        assert_eq!(command.argv, vec!["echo", "/home/bob", ""]);
        assert!(command.undefined_variable.is_none());
    }

    #[test]
    fn undefined_variable_becomes_empty_argument() {
        let command = parse("echo $NOPE").unwrap().unwrap();
        assert_eq!(command.argv, vec!["echo", ""]);
        assert_eq!(command.undefined_variable.as_deref(), Some("NOPE"));
    }

    #[test]
    fn only_last_undefined_variable_is_kept() {
        let command = parse("echo $FIRST $HOME $SECOND").unwrap().unwrap();
        assert_eq!(command.argv, vec!["echo", "", "/home/bob", ""]);
        assert_eq!(command.undefined_variable.as_deref(), Some("SECOND"));
    }

    #[test]
    fn infile_valid() {
        let with_space = parse("cmd < infile").unwrap().unwrap();
        let no_space = parse("cmd <infile").unwrap().unwrap();
        assert_eq!(with_space.infile.as_deref(), Some("infile"));
        assert_eq!(no_space.infile.as_deref(), Some("infile"));
        assert_eq!(with_space.argv, vec!["cmd"]);
    }

    #[test]
    fn infile_invalid() {
        assert_eq!(syntax_message("cmd <"), "missing argument after <");
        assert_eq!(syntax_message("cmd < \n"), "missing argument after <");
    }

    #[test]
    fn outfile_valid() {
        let with_space = parse("cmd > outfile").unwrap().unwrap();
        let no_space = parse("cmd >outfile").unwrap().unwrap();
        assert_eq!(with_space.outfile.as_deref(), Some("outfile"));
        assert_eq!(no_space.outfile.as_deref(), Some("outfile"));
    }

    #[test]
    fn outfile_invalid() {
        assert_eq!(syntax_message("cmd >"), "missing argument after >");
    }

    #[test]
    fn redirect_anywhere() {
        let command = parse("> out cmd < in arg").unwrap().unwrap();
        assert_eq!(command.argv, vec!["cmd", "arg"]);
        assert_eq!(command.infile.as_deref(), Some("in"));
        assert_eq!(command.outfile.as_deref(), Some("out"));
    }

    #[test]
    fn redirect_target_is_not_expanded() {
        let command = parse("cmd > $HOME").unwrap().unwrap();
        assert_eq!(command.outfile.as_deref(), Some("$HOME"));
    }

    #[test]
    fn background() {
        let command = parse("sleep 1 &\n").unwrap().unwrap();
        assert!(command.background);
        assert_eq!(command.argv, vec!["sleep", "1"]);
        assert_eq!(command.input, "sleep 1 &");
    }

    #[test]
    fn background_not_last() {
        assert_eq!(syntax_message("sleep 1 & echo"), "invalid arguments");
        assert_eq!(syntax_message("sleep & 1"), "invalid arguments");
    }

    #[test]
    fn missing_command() {
        assert_eq!(syntax_message("&"), "invalid null command");
        assert_eq!(syntax_message("> out"), "invalid null command");
    }

    #[test]
    fn argument_limit() {
        let at_limit = vec!["a"; MAX_ARGUMENTS].join(" ");
        assert_eq!(parse(&at_limit).unwrap().unwrap().argv.len(), MAX_ARGUMENTS);

        let over_limit = vec!["a"; MAX_ARGUMENTS + 1].join(" ");
        assert_eq!(syntax_message(&over_limit), "too many arguments");
    }

    #[test]
    fn program_and_args() {
        let command = parse("ls -l /tmp").unwrap().unwrap();
        assert_eq!(command.program(), "ls");
        assert_eq!(command.args(), &["-l".to_string(), "/tmp".to_string()][..]);
    }
}
