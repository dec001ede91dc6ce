// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The tracked job record: identity, status, error buffer, and (for
//! commands) the platform child handle.

use bgjobs_core::{BgOp, JobId, JobKind};
use parking_lot::Mutex;
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout};
use std::sync::atomic::{AtomicBool, Ordering};

/// Fields guarded by a single lock so `running`/`exit_code`/`use_count`/
/// `erroring` are always observed consistently together.
#[derive(Debug, Default)]
pub struct JobStatus {
    pub running: bool,
    /// Meaningful only once `!running`. Negative is the "undetermined" sentinel.
    pub exit_code: i32,
    /// Extra holders beyond the registry itself (the drain worker while it
    /// holds the error stream, plus external `JobHandle`s).
    pub use_count: u32,
    /// The drain worker still references this job's error stream.
    pub erroring: bool,
}

#[derive(Debug, Default)]
struct JobErrors {
    /// Complete concatenation of everything read from the error stream.
    errors: String,
    /// Bytes appended since the last `take_new_errors`.
    new_errors: String,
}

type ExitCallback = Box<dyn FnOnce(&Job) + Send>;

/// A single tracked unit of background work.
pub struct Job {
    pub id: JobId,
    pub kind: JobKind,
    pub cmd: String,
    pub in_menu: bool,
    pub with_bg_op: bool,

    status: Mutex<JobStatus>,
    errors: Mutex<JobErrors>,
    bg_op: Option<BgOp>,

    /// Command-kind soft-cancel flag. Task/Operation cancellation lives on
    /// `bg_op` instead (see `Job::cancel`).
    cancelled: AtomicBool,
    skip_errors: AtomicBool,
    on_job_bar: AtomicBool,
    /// Set by the drain worker once it observes EOF/error on `err_stream`.
    drained: AtomicBool,

    exit_cb: Mutex<Option<ExitCallback>>,

    child: Mutex<Option<Child>>,
    input: Mutex<Option<ChildStdin>>,
    output: Mutex<Option<ChildStdout>>,
    err_stream: Mutex<Option<ChildStderr>>,
}

impl Job {
    pub fn new_command(
        id: JobId,
        cmd: String,
        in_menu: bool,
        skip_errors: bool,
    ) -> Self {
        Self {
            id,
            kind: JobKind::Command,
            cmd,
            in_menu,
            with_bg_op: false,
            status: Mutex::new(JobStatus {
                running: true,
                exit_code: -1,
                use_count: 0,
                erroring: false,
            }),
            errors: Mutex::new(JobErrors::default()),
            bg_op: None,
            cancelled: AtomicBool::new(false),
            skip_errors: AtomicBool::new(skip_errors),
            on_job_bar: AtomicBool::new(false),
            drained: AtomicBool::new(false),
            exit_cb: Mutex::new(None),
            child: Mutex::new(None),
            input: Mutex::new(None),
            output: Mutex::new(None),
            err_stream: Mutex::new(None),
        }
    }

    pub fn new_worker(id: JobId, kind: JobKind, descr: String, total: u64, in_menu: bool) -> Self {
        debug_assert!(!kind.is_command());
        Self {
            id,
            kind,
            cmd: descr.clone(),
            in_menu,
            with_bg_op: true,
            status: Mutex::new(JobStatus {
                running: true,
                exit_code: -1,
                use_count: 0,
                erroring: false,
            }),
            errors: Mutex::new(JobErrors::default()),
            bg_op: Some(BgOp::new(total, Some(descr))),
            cancelled: AtomicBool::new(false),
            skip_errors: AtomicBool::new(true),
            on_job_bar: AtomicBool::new(false),
            drained: AtomicBool::new(false),
            exit_cb: Mutex::new(None),
            child: Mutex::new(None),
            input: Mutex::new(None),
            output: Mutex::new(None),
            err_stream: Mutex::new(None),
        }
    }

    pub fn attach_child(
        &self,
        child: Child,
        input: Option<ChildStdin>,
        output: Option<ChildStdout>,
        err_stream: Option<ChildStderr>,
    ) {
        *self.child.lock() = Some(child);
        *self.input.lock() = input;
        *self.output.lock() = output;
        *self.err_stream.lock() = err_stream;
    }

    pub fn pid(&self) -> Option<i32> {
        self.child.lock().as_ref().map(|c| c.id() as i32)
    }

    pub fn bg_op(&self) -> Option<&BgOp> {
        self.bg_op.as_ref()
    }

    // --- status ---

    pub fn is_running(&self) -> bool {
        self.status.lock().running
    }

    pub fn exit_code(&self) -> i32 {
        self.status.lock().exit_code
    }

    /// Preserved exactly as specified: `!running && exit_code >= 0`. This is
    /// true for every normally exited child, not only ones killed by signal;
    /// callers should not treat it as a reliable "was it killed" predicate.
    pub fn was_killed(&self) -> bool {
        let status = self.status.lock();
        !status.running && status.exit_code >= 0
    }

    pub fn use_count(&self) -> u32 {
        self.status.lock().use_count
    }

    pub fn is_erroring(&self) -> bool {
        self.status.lock().erroring
    }

    pub fn mark_finished(&self, exit_code: i32) {
        let mut status = self.status.lock();
        if !status.running {
            return;
        }
        status.running = false;
        status.exit_code = exit_code;
    }

    /// Marks this job referenced by the drain worker; call exactly once,
    /// when it is handed off.
    pub fn mark_erroring(&self) {
        let mut status = self.status.lock();
        status.erroring = true;
        status.use_count += 1;
    }

    /// The drain worker releases its hold once the stream is drained.
    pub fn release_drain_hold(&self) {
        let mut status = self.status.lock();
        debug_assert!(status.use_count > 0);
        status.erroring = false;
        status.use_count = status.use_count.saturating_sub(1);
    }

    pub fn incref(&self) {
        self.status.lock().use_count += 1;
    }

    pub fn decref(&self) {
        let mut status = self.status.lock();
        debug_assert!(status.use_count > 0, "use_count underflow");
        status.use_count = status.use_count.saturating_sub(1);
    }

    pub fn can_remove(&self) -> bool {
        let status = self.status.lock();
        !status.running && status.use_count == 0
    }

    // --- errors ---

    pub fn append_error(&self, chunk: &str) {
        let mut errors = self.errors.lock();
        errors.errors.push_str(chunk);
        errors.new_errors.push_str(chunk);
    }

    pub fn errors(&self) -> String {
        self.errors.lock().errors.clone()
    }

    /// Swap out the delta buffer, returning whatever had accumulated since
    /// the last call.
    pub fn take_new_errors(&self) -> String {
        std::mem::take(&mut self.errors.lock().new_errors)
    }

    pub fn skip_errors(&self) -> bool {
        self.skip_errors.load(Ordering::Acquire)
    }

    pub fn set_skip_errors(&self, skip: bool) {
        self.skip_errors.store(skip, Ordering::Release);
    }

    pub fn mark_drained(&self) {
        self.drained.store(true, Ordering::Release);
    }

    pub fn is_drained(&self) -> bool {
        self.drained.load(Ordering::Acquire)
    }

    pub fn take_err_stream(&self) -> Option<ChildStderr> {
        self.err_stream.lock().take()
    }

    pub fn has_err_stream(&self) -> bool {
        self.err_stream.lock().is_some()
    }

    // --- job bar ---

    pub fn is_on_job_bar(&self) -> bool {
        self.on_job_bar.load(Ordering::Acquire)
    }

    pub fn set_on_job_bar(&self, on: bool) {
        self.on_job_bar.store(on, Ordering::Release);
    }

    // --- cancellation ---

    /// Returns true iff this call newly cancelled the job (it was not
    /// already cancelled).
    pub fn cancel(&self) -> bool {
        if self.kind.is_command() {
            let was = self.cancelled.swap(true, Ordering::AcqRel);
            if !was {
                if let Some(pid) = self.pid() {
                    if let Err(err) = bgjobs_adapters::soft_cancel(pid) {
                        tracing::warn!(job_id = %self.id, pid, error = %err, "soft cancel failed");
                    }
                }
            }
            !was
        } else {
            self.bg_op
                .as_ref()
                .map(|op| op.cancel())
                .unwrap_or(false)
        }
    }

    pub fn is_cancelled(&self) -> bool {
        if self.kind.is_command() {
            self.cancelled.load(Ordering::Acquire)
        } else {
            self.bg_op.as_ref().map(|op| op.is_cancelled()).unwrap_or(false)
        }
    }

    /// Command-only: unconditionally kill the child. Never blocks.
    pub fn terminate(&self) {
        if !self.kind.is_command() || !self.is_running() {
            return;
        }
        if let Some(pid) = self.pid() {
            if let Err(err) = bgjobs_adapters::hard_terminate(pid) {
                tracing::warn!(job_id = %self.id, pid, error = %err, "hard terminate failed");
            }
        }
    }

    /// Command-only: close owned streams to unblock the child, then block
    /// until the OS reports it has exited.
    pub fn wait(&self) -> i32 {
        debug_assert!(self.kind.is_command());
        self.input.lock().take();
        self.output.lock().take();
        let mut child_slot = self.child.lock();
        let Some(child) = child_slot.as_mut() else {
            return self.exit_code();
        };
        match child.wait() {
            Ok(status) => {
                #[cfg(unix)]
                let code = {
                    use std::os::unix::process::ExitStatusExt;
                    status.code().unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
                };
                #[cfg(not(unix))]
                let code = status.code().unwrap_or(-1);
                self.mark_finished(code);
                code
            }
            Err(err) => {
                tracing::warn!(job_id = %self.id, error = %err, "wait failed");
                -1
            }
        }
    }

    pub fn take_input(&self) -> Option<ChildStdin> {
        self.input.lock().take()
    }

    pub fn take_output(&self) -> Option<ChildStdout> {
        self.output.lock().take()
    }

    pub fn set_exit_cb(&self, cb: ExitCallback) {
        *self.exit_cb.lock() = Some(cb);
    }

    /// Invoked exactly once by the sweep on the running->stopped transition.
    pub fn take_exit_cb(&self) -> Option<ExitCallback> {
        self.exit_cb.lock().take()
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("cmd", &self.cmd)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
