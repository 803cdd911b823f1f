//! Jobsh - Job Shell
//!
//! A small interactive shell: variable expansion, `<`/`>` redirection, `&`
//! background jobs reaped once per command loop iteration, and a handful of
//! builtins (`cd`, `echo`, `exit`, `history`, `jobs`).

#![deny(missing_debug_implementations, trivial_numeric_casts, unused_import_braces)]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

/// Logs the error of a `Result` that is otherwise being discarded.
macro_rules! log_if_err {
    ($result:expr, $fmt:expr) => {{
        if let Err(ref e) = $result {
            error!(concat!($fmt, ": {}"), e);
        }
    }};
    ($result:expr, $fmt:expr, $($arg:tt)*) => {{
        if let Err(ref e) = $result {
            error!(concat!($fmt, ": {}"), $($arg)*, e);
        }
    }};
}

mod builtins;
pub mod editor;
pub mod errors;
pub mod history;
pub mod parse;
pub mod shell;
pub mod variable_expansion;

pub use crate::editor::Editor;
pub use crate::shell::{Shell, ShellConfig};
