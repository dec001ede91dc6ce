// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unix process spawning, non-blocking reaping, and signal delivery.

use bgjobs_core::SpawnFlags;
use nix::sys::signal::{killpg, sigaction, SaFlags, SigAction, SigHandler, SigSet};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, Stdio};

pub use nix::sys::signal::Signal;

/// The signal sent by [`soft_cancel`].
pub const CANCEL_SIGNAL: Signal = Signal::SIGINT;
/// The signal sent by [`hard_terminate`].
pub const TERMINATE_SIGNAL: Signal = Signal::SIGKILL;

/// Outcome of reaping one child, encoded the way a POSIX shell reports `$?`:
/// a normal exit keeps its code, a signal death is reported as `128 + signum`.
/// Both cases are non-negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Exited(i32),
    Signaled(i32),
}

impl ExitStatus {
    /// The `exit_code` value stored on the job record.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Exited(code) => code,
            ExitStatus::Signaled(signum) => 128 + signum,
        }
    }
}

/// A freshly spawned child with whichever stdio streams the caller asked for.
pub struct SpawnedChild {
    pub child: Child,
    pub pid: i32,
    pub stdin: Option<ChildStdin>,
    pub stdout: Option<ChildStdout>,
    pub stderr: Option<ChildStderr>,
}

/// Spawn `<shell> <shell_flag> <cmd>`, wiring stdio per `flags`.
///
/// Unless `flags` contains [`SpawnFlags::KEEP_IN_FG`], the child is made a
/// session leader via `setsid` so it is fully detached from the controlling
/// terminal and can be signalled as a group without affecting the embedder.
pub fn spawn(
    shell: &str,
    shell_flag: &str,
    cmd: &str,
    pwd: Option<&Path>,
    flags: SpawnFlags,
) -> Result<SpawnedChild, bgjobs_core::SpawnError> {
    if let Some(dir) = pwd {
        if !dir.is_dir() {
            return Err(bgjobs_core::SpawnError::InvalidCwd(dir.to_path_buf()));
        }
    }

    let mut command = Command::new(shell);
    command.arg(shell_flag).arg(cmd);
    if let Some(dir) = pwd {
        command.current_dir(dir);
    }

    command.stdin(if flags.contains(SpawnFlags::SUPPLY_INPUT) {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    command.stdout(if flags.contains(SpawnFlags::CAPTURE_OUT) {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    command.stderr(
        if flags.contains(SpawnFlags::CAPTURE_OUT) && flags.contains(SpawnFlags::MERGE_STREAMS) {
            // Merged into stdout; dup2 happens in pre_exec below once both
            // fds are known to the child.
            Stdio::null()
        } else if flags.contains(SpawnFlags::MERGE_STREAMS) {
            Stdio::null()
        } else {
            Stdio::piped()
        },
    );

    let merge_streams =
        flags.contains(SpawnFlags::CAPTURE_OUT) && flags.contains(SpawnFlags::MERGE_STREAMS);
    let detach = !flags.contains(SpawnFlags::KEEP_IN_FG);

    // SAFETY: only async-signal-safe calls (setsid, dup2, sigaction) run
    // between fork and exec, per signal-safety(7).
    unsafe {
        command.pre_exec(move || {
            if merge_streams {
                if libc::dup2(libc::STDOUT_FILENO, libc::STDERR_FILENO) < 0 {
                    return Err(std::io::Error::last_os_error());
                }
            }
            if detach {
                nix::unistd::setsid().map_err(std::io::Error::from)?;
            }
            let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
            for sig in [
                nix::sys::signal::Signal::SIGINT,
                nix::sys::signal::Signal::SIGQUIT,
                nix::sys::signal::Signal::SIGTERM,
                nix::sys::signal::Signal::SIGTSTP,
            ] {
                let _ = sigaction(sig, &default);
            }
            Ok(())
        });
    }

    let mut child = command.spawn().map_err(|source| bgjobs_core::SpawnError::Exec {
        cmd: cmd.to_string(),
        source,
    })?;

    let pid = child.id() as i32;
    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    tracing::debug!(pid, cmd, detached = detach, "spawned child");

    Ok(SpawnedChild {
        child,
        pid,
        stdin,
        stdout,
        stderr,
    })
}

/// Non-blocking reap of every child that has terminated since the last call.
///
/// Must be called only from the single thread that owns child reaping; it
/// races with itself otherwise (two concurrent `waitpid(-1, WNOHANG)` calls
/// can each observe a different pid with no way to reconcile which job it
/// belonged to without external synchronization).
pub fn reap_all() -> Vec<(i32, ExitStatus)> {
    let mut reaped = Vec::new();
    loop {
        match waitpid(Some(Pid::from_raw(-1)), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(pid, code)) => {
                reaped.push((pid.as_raw(), ExitStatus::Exited(code)))
            }
            Ok(WaitStatus::Signaled(pid, sig, _core_dumped)) => {
                reaped.push((pid.as_raw(), ExitStatus::Signaled(sig as i32)))
            }
            Ok(WaitStatus::StillAlive) | Err(nix::errno::Errno::ECHILD) => break,
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!(error = %err, "waitpid failed");
                break;
            }
        }
    }
    if !reaped.is_empty() {
        tracing::debug!(count = reaped.len(), "reaped children");
    }
    reaped
}

/// Send the soft-cancel signal to the child's process group.
///
/// Falls back to signalling the pid directly if it is not a process group
/// leader (e.g. the child was spawned with `KEEP_IN_FG`).
pub fn soft_cancel(pid: i32) -> nix::Result<()> {
    send_to_group_or_pid(pid, CANCEL_SIGNAL)
}

/// Send the hard-terminate signal to the child's process group.
pub fn hard_terminate(pid: i32) -> nix::Result<()> {
    send_to_group_or_pid(pid, TERMINATE_SIGNAL)
}

fn send_to_group_or_pid(pid: i32, signal: Signal) -> nix::Result<()> {
    match killpg(Pid::from_raw(pid), signal) {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::debug!(pid, %signal, error = %err, "killpg failed, signalling pid directly");
            nix::sys::signal::kill(Pid::from_raw(pid), signal)
        }
    }
}

#[cfg(test)]
#[path = "unix_tests.rs"]
mod tests;
