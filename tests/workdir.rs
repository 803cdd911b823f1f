use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{self, Command, Stdio};

use tempdir::TempDir;

/// WorkDir represents a directory in which tests are run.
#[derive(Debug)]
pub struct WorkDir {
    /// The directory in which the test will run, removed when dropped.
    dir: TempDir,
}

impl WorkDir {
    /// Creates a fresh scratch directory under the tests directory.
    pub fn new(name: &str) -> WorkDir {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests");
        WorkDir {
            dir: TempDir::new_in(root, name).expect("create scratch directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates `name` in the scratch directory with the given contents.
    pub fn create(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    /// Reads `name` from the scratch directory.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).expect("read file")
    }

    /// Builds a new command running jobsh in this working directory.
    ///
    /// The log is kept inside the scratch directory.
    pub fn command<I, S>(&self, args: I) -> process::Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(self.bin());
        cmd.current_dir(self.path());
        cmd.arg(format!("--log={}", self.path().join("jobsh.log").display()));
        cmd.args(args);
        cmd
    }

    /// Returns path to executable.
    fn bin(&self) -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_jobsh"))
    }

    /// Runs the command with `script` piped to its stdin and collects its output.
    ///
    /// Panics if the command fails.
    pub fn pipe<S: AsRef<[u8]>>(&self, cmd: &mut process::Command, script: S) -> process::Output {
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let mut child = cmd.spawn().expect("spawn jobsh");
        child
            .stdin
            .take()
            .expect("child stdin")
            .write_all(script.as_ref())
            .expect("write script");

        let o = child.wait_with_output().expect("wait for jobsh");
        self.check(cmd, o)
    }

    /// Executes the command and collects its stdout.
    pub fn stdout(&self, cmd: &mut process::Command) -> String {
        let o = self.output(cmd);
        String::from_utf8_lossy(&o.stdout).into_owned()
    }

    /// Executes the command and collects its output.
    ///
    /// Panic if the command fails.
    pub fn output(&self, cmd: &mut process::Command) -> process::Output {
        cmd.stdin(Stdio::null());
        let o = cmd.output().expect("run jobsh");
        self.check(cmd, o)
    }

    fn check(&self, cmd: &process::Command, o: process::Output) -> process::Output {
        if !o.status.success() {
            panic!(
                "\n\n==========\n\
                 command failed but expected success!\
                 \n\ncommand: {:?}\
                 \ncwd: {}\
                 \n\nstatus: {}\
                 \n\nstdout: {}\
                 \n\nstderr: {}\
                 \n\n==========\n",
                cmd,
                self.path().display(),
                o.status,
                String::from_utf8_lossy(&o.stdout),
                String::from_utf8_lossy(&o.stderr)
            );
        }
        o
    }
}
