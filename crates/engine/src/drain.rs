// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The error-drain worker: a single background thread that multiplexes the
//! stderr streams of every live [`crate::job::Job`] of kind `Command`.
//!
//! Modeled on a hand-off list plus wake event, the same shape as a
//! durability-free event bus: the foreground appends work and signals a
//! condition variable; the worker drains the hand-off list, folds it into
//! its own private collection, and blocks in `poll(2)` the rest of the time.

use crate::job::Job;
use bgjobs_adapters::WakePipe;
use parking_lot::{Condvar, Mutex};
use std::io::Read;
use std::os::fd::AsFd;
use std::process::ChildStderr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const READ_CHUNK: usize = 1023;
const IDLE_WAIT: Duration = Duration::from_millis(250);

struct HandOff {
    jobs: Mutex<Vec<Arc<Job>>>,
    condvar: Condvar,
}

/// Handle held by the foreground to hand jobs off to the drain worker and
/// to shut it down.
pub struct DrainHandle {
    handoff: Arc<HandOff>,
    wake: Arc<WakePipe>,
    running: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl DrainHandle {
    pub fn start() -> std::io::Result<Self> {
        let handoff = Arc::new(HandOff {
            jobs: Mutex::new(Vec::new()),
            condvar: Condvar::new(),
        });
        let wake = Arc::new(WakePipe::new()?);
        let running = Arc::new(AtomicBool::new(true));

        let worker_handoff = Arc::clone(&handoff);
        let worker_wake = Arc::clone(&wake);
        let worker_running = Arc::clone(&running);
        let thread = std::thread::Builder::new()
            .name("bgjobs-error-drain".into())
            .spawn(move || run(worker_handoff, worker_wake, worker_running))?;

        Ok(Self {
            handoff,
            wake,
            running,
            thread: Some(thread),
        })
    }

    /// Hand a command job with a live error stream off to the worker.
    ///
    /// Caller must have already called [`Job::mark_erroring`].
    pub fn submit(&self, job: Arc<Job>) {
        self.handoff.jobs.lock().push(job);
        self.handoff.condvar.notify_one();
        self.wake.wake();
    }

    /// Wake the worker without handing off new work, e.g. after the
    /// foreground notices `erroring` jobs during a sweep.
    pub fn nudge(&self) {
        self.wake.wake();
    }
}

impl Drop for DrainHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        self.handoff.condvar.notify_all();
        self.wake.wake();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run(handoff: Arc<HandOff>, wake: Arc<WakePipe>, running: Arc<AtomicBool>) {
    let mut local: Vec<(Arc<Job>, ChildStderr)> = Vec::new();

    while running.load(Ordering::Acquire) {
        local.retain(|(job, _)| {
            if job.is_drained() {
                job.release_drain_hold();
                false
            } else {
                true
            }
        });

        {
            let mut pending = handoff.jobs.lock();
            if local.is_empty() && pending.is_empty() {
                handoff.condvar.wait_for(&mut pending, IDLE_WAIT);
                continue;
            }
            for job in pending.drain(..) {
                match job.take_err_stream() {
                    Some(stream) => local.push((job, stream)),
                    None => job.release_drain_hold(),
                }
            }
        }

        let fds: Vec<_> = local.iter().map(|(_, s)| s.as_fd()).collect();
        let outcome = match bgjobs_adapters::poll_readable(&fds, &wake) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(error = %err, "drain worker poll failed");
                continue;
            }
        };

        let mut buf = [0u8; READ_CHUNK];
        for &i in &outcome.ready {
            let (job, stream) = &mut local[i];
            match stream.read(&mut buf) {
                Ok(0) => job.mark_drained(),
                Ok(n) => {
                    let chunk = String::from_utf8_lossy(&buf[..n]);
                    job.append_error(&chunk);
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {}
                Err(err) => {
                    tracing::debug!(job_id = %job.id, error = %err, "error stream read failed");
                    job.mark_drained();
                }
            }
        }
    }

    for (job, _) in local {
        job.release_drain_hold();
    }
}

#[cfg(test)]
#[path = "drain_tests.rs"]
mod tests;
