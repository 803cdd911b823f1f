//! Error module. See the [error-chain](https://crates.io/crates/error-chain) crate for details.

#![allow(missing_docs)]

error_chain! {
    foreign_links {
        Docopt(::docopt::Error);
        Io(::std::io::Error);
        Logger(::log::SetLoggerError);
        Nix(::nix::Error);
        Readline(::rustyline::error::ReadlineError);
    }

    errors {
        /// The input line is malformed and is discarded.
        Syntax(message: String) {
            description("syntax error")
            display("{}", message)
        }

        /// A builtin command failed.
        BuiltinCommand(message: String) {
            description("builtin command error")
            display("{}", message)
        }

        /// The command could not be handed to a new process.
        Launch(program: String) {
            description("failed to launch command")
            display("{}: failed to launch", program)
        }

        /// The kernel refused to create a new process.
        Fork {
            description("unable to create process")
            display("unable to create process")
        }
    }
}

impl Error {
    pub(crate) fn syntax<T: AsRef<str>>(message: T) -> Error {
        ErrorKind::Syntax(message.as_ref().to_string()).into()
    }

    pub(crate) fn builtin_command<T: AsRef<str>>(message: T) -> Error {
        ErrorKind::BuiltinCommand(message.as_ref().to_string()).into()
    }

    /// Returns `true` if the interpreter cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(*self.kind(), ErrorKind::Fork)
    }
}
