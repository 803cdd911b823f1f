//! Background job bookkeeping.
//!
//! A job is created *pending* while its line is parsed, becomes *running* once
//! the forked child's pid is attached, and is removed as soon as the reaper
//! sees that child exit. Reaping is polled with `WNOHANG` once per command
//! that is about to run, so a completion notice shows up right before the
//! first command dispatched after the process exits. Blank lines and lines
//! with syntax errors never reap.

use std::fmt;
use std::io::Write;

use nix::errno::Errno;
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::errors::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A job running in the background that the shell is responsible for.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    id: JobId,
    pid: Pid,
    /// The original command line entered.
    command: String,
}

impl Job {
    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.id, self.pid, self.command)
    }
}

/// A job whose id is assigned but whose process does not exist yet.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingJob {
    id: JobId,
    command: String,
}

impl PendingJob {
    pub fn id(&self) -> JobId {
        self.id
    }
}

/// Registry of live background jobs, kept in creation order.
#[derive(Default)]
pub struct JobManager {
    jobs: Vec<Job>,
    /// Set between parsing a background line and forking its process
    pending: Option<PendingJob>,
    /// The number of jobs ever created; ids are never reused.
    job_count: u32,
}

impl JobManager {
    /// Registers a pending job for `command` and returns its id.
    ///
    /// A pending job left over from an earlier line is dropped.
    pub fn create_job(&mut self, command: &str) -> JobId {
        self.discard_pending();
        let job_id = self.get_next_job_id();
        debug!("created pending job [{}]: {}", job_id, command);
        self.pending = Some(PendingJob {
            id: job_id,
            command: command.to_string(),
        });
        job_id
    }

    /// Turns the pending job into a running one owned by `pid`.
    pub fn attach_process(&mut self, pid: Pid) -> Option<JobId> {
        let PendingJob { id, command } = self.pending.take()?;
        debug!("job [{}] is running as {}", id, pid);
        self.jobs.push(Job { id, pid, command });
        Some(id)
    }

    /// Drops the pending job, e.g. when its command turned out to be a
    /// builtin. Its id stays consumed.
    pub fn discard_pending(&mut self) -> Option<PendingJob> {
        let job = self.pending.take()?;
        debug!("discarded pending job [{}]", job.id);
        Some(job)
    }

    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    pub fn get_jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Removes the job owning `pid`, shifting later jobs left.
    pub fn remove_job_with_process(&mut self, pid: Pid) -> Option<Job> {
        let job_index = self.find_job_with_process(pid)?;
        Some(self.jobs.remove(job_index))
    }

    /// Checks for exited children without blocking, announcing and removing
    /// their jobs. Repeats until no more children have exited.
    pub fn do_job_notification<W: Write + ?Sized>(&mut self, stdout: &mut W) -> Result<()> {
        loop {
            let wait_any_child = Pid::from_raw(-1);
            let wait_status = match wait::waitpid(wait_any_child, Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => break,
                Err(Errno::EINTR) => continue,
                Ok(wait_status) => wait_status,
                Err(e) => return Err(e.into()),
            };

            let pid = match wait_status.pid() {
                Some(pid) => pid,
                None => continue,
            };
            match wait_status {
                WaitStatus::Exited(..) | WaitStatus::Signaled(..) => {
                    debug!("{} finished: {:?}", pid, wait_status);
                    match self.remove_job_with_process(pid) {
                        Some(job) => writeln!(stdout, "[{}] Done {}", job.id, job.command)?,
                        None => warn!("reaped {} which belongs to no job", pid),
                    }
                }
                _ => debug!("ignoring status change of {}: {:?}", pid, wait_status),
            }
        }

        stdout.flush()?;
        Ok(())
    }

    fn get_next_job_id(&mut self) -> JobId {
        self.job_count += 1;
        JobId(self.job_count)
    }

    fn find_job_with_process(&self, pid: Pid) -> Option<usize> {
        self.jobs.iter().position(|job| job.pid == pid)
    }
}

impl fmt::Debug for JobManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} jobs\tjob_count: {}", self.jobs.len(), self.job_count)?;
        if let Some(ref pending) = self.pending {
            writeln!(f, "pending: {:?}", pending)?;
        }
        for job in &self.jobs {
            writeln!(f, "{:?}", job)?;
        }

        Ok(())
    }
}
