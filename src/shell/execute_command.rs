use std::env;
use std::ffi::{CString, OsStr};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

use nix::errno::Errno;
use nix::libc;
use nix::sys::wait;
use nix::unistd::{self, ForkResult, Pid};

use crate::errors::{ErrorKind, Result, ResultExt};
use crate::parse::Command;

/// Permissions of files created by output redirection: owner read/write.
const OUTFILE_MODE: u32 = 0o600;
/// Status of a child whose program could not be executed.
const EXEC_FAILURE_EXIT_STATUS: i32 = 1;

/// Replaces a bare program name with the first match found in `PATH`.
///
/// Programs naming a path (`./run`, `/bin/ls`) are left alone, as are names
/// with no match; the latter fail later when the child tries to execute them.
pub fn resolve_program(command: &mut Command) {
    if command.program().contains('/') {
        return;
    }

    let path_var = env::var_os("PATH");
    if let Some(full_path) = search_path(command.program(), path_var.as_deref()) {
        debug!("resolved {} to {}", command.program(), full_path);
        command.argv[0] = full_path;
    }
}

/// Returns the first `dir/program` that exists for the `:` separated
/// directories in `path_var`, in order.
///
/// Only existence is checked, not the executable bit.
pub fn search_path(program: &str, path_var: Option<&OsStr>) -> Option<String> {
    let path_var = path_var?.to_string_lossy();
    path_var
        .split(':')
        .filter(|dir| !dir.is_empty())
        .map(|dir| format!("{}/{}", dir, program))
        .find(|candidate| Path::new(candidate).exists())
}

/// Forks a child that applies the command's redirections and executes it.
///
/// Returns the child's pid in the parent. A failed `fork` is reported as
/// `ErrorKind::Fork`.
pub fn launch(command: &Command) -> Result<Pid> {
    let argv = command
        .argv
        .iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .chain_err(|| ErrorKind::Launch(command.program().to_string()))?;

    // Anything still buffered would otherwise be written twice, once by the
    // child as well.
    io::stdout().flush()?;

    let fork_result = unsafe { unistd::fork() }.chain_err(|| ErrorKind::Fork)?;
    match fork_result {
        ForkResult::Parent { child } => {
            debug!("forked {} for `{}`", child, command.input);
            Ok(child)
        }
        ForkResult::Child => exec_child(command, &argv),
    }
}

/// Runs in the forked child; never returns.
fn exec_child(command: &Command, argv: &[CString]) -> ! {
    if let Some(ref infile) = command.infile {
        let result = File::open(infile).and_then(|file| redirect(&file, libc::STDIN_FILENO));
        if let Err(e) = result {
            eprintln!("[ERROR]: {}: {}", infile, e);
        }
    }

    if let Some(ref outfile) = command.outfile {
        let result = open_outfile(outfile).and_then(|file| redirect(&file, libc::STDOUT_FILENO));
        if let Err(e) = result {
            eprintln!("[ERROR]: {}: {}", outfile, e);
        }
    }

    if let Err(e) = unistd::execv(&argv[0], argv) {
        eprintln!("[ERROR]: {}: {}", command.program(), e.desc());
    }

    // skip the parent's atexit handlers and buffered output
    unsafe { libc::_exit(EXEC_FAILURE_EXIT_STATUS) }
}

/// Opens `path` for output redirection, creating or truncating it.
pub fn open_outfile<P: AsRef<Path>>(path: P) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(OUTFILE_MODE)
        .open(path)
}

/// Points `target` at `file`. `file` is closed when dropped by the caller.
fn redirect(file: &File, target: RawFd) -> io::Result<()> {
    unistd::dup2(file.as_raw_fd(), target)
        .map(|_| ())
        .map_err(io::Error::from)
}

/// Blocks until `pid` exits; its exit status is discarded.
pub fn wait_for_process(pid: Pid) -> Result<()> {
    loop {
        match wait::waitpid(pid, None) {
            Ok(status) => {
                debug!("foreground process finished: {:?}", status);
                return Ok(());
            }
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => {
                // already collected by a reaper
                debug!("{} was reaped elsewhere", pid);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }
}
