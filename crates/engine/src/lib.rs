// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bgjobs-engine: the background job subsystem for an interactive
//! terminal file manager.
//!
//! [`Jobs`] is the single entry point an embedder holds: it owns the job
//! registry, starts the error-drain worker, and exposes every operation
//! described in the module docs of [`job`], [`registry`], [`drain`],
//! [`bootstrap`], [`reaper`], and [`sweep`].

mod bootstrap;
mod drain;
mod error;
mod handle;
mod helpers;
mod job;
mod reaper;
mod registry;
mod sweep;

pub use bgjobs_core::{
    BgOpState, Cancellation, ErrorPrompt, ExecuteError, JobBarHooks, JobId, JobKind, ShellConfig,
    ShellRequester, SpawnError, SpawnFlags,
};
pub use error::InitError;
pub use handle::{JobHandle, ProgressHandle};
pub use helpers::{and_wait_for_errors, run_and_capture};
pub use job::Job;

use bgjobs_core::JobIdGen;
use registry::JobRegistry;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Portable, non-configurable shell flag used for internally constructed
/// commands ([`ShellRequester::App`]), matching the platform's inline
/// command flag regardless of the embedder's configured interactive shell.
fn app_shell_flag() -> &'static str {
    if cfg!(windows) {
        "/C"
    } else {
        "-c"
    }
}

/// The background job subsystem. Not `Sync`: every registry-mutating
/// method takes `&mut self`, so the type system enforces the single-writer
/// invariant the design relies on instead of a runtime assertion.
pub struct Jobs {
    registry: JobRegistry,
    id_gen: JobIdGen,
    hooks: Arc<dyn JobBarHooks>,
    prompt: Arc<dyn ErrorPrompt>,
    shell_config: Arc<dyn ShellConfig>,
    drain: drain::DrainHandle,
    sweeping: Arc<AtomicBool>,
    last_job_count: usize,
}

impl Jobs {
    /// Starts the error-drain worker and returns a ready-to-use handle.
    pub fn init(
        hooks: Arc<dyn JobBarHooks>,
        prompt: Arc<dyn ErrorPrompt>,
        shell_config: Arc<dyn ShellConfig>,
    ) -> Result<Self, InitError> {
        let drain = drain::DrainHandle::start().map_err(InitError::DrainWorker)?;
        Ok(Self {
            registry: JobRegistry::new(),
            id_gen: JobIdGen::new(),
            hooks,
            prompt,
            shell_config,
            drain,
            sweeping: Arc::new(AtomicBool::new(false)),
            last_job_count: 0,
        })
    }

    fn shell_and_flag(&self, requester: ShellRequester) -> (String, String) {
        let shell = self.shell_config.shell();
        let flag = match requester {
            ShellRequester::App => app_shell_flag().to_string(),
            ShellRequester::User => self.shell_config.shell_cmd_flag(),
        };
        (shell, flag)
    }

    /// Non-reentrant periodic sweep. A nested call (e.g. triggered from
    /// inside the embedder's `prompt_error` callback) is a no-op.
    pub fn check(&mut self, show_errors: bool) {
        let Some(_guard) = sweep::SweepGuard::try_acquire(&self.sweeping) else {
            tracing::debug!("nested check() call ignored");
            return;
        };
        let span = tracing::info_span!("check", show_errors);
        let _enter = span.enter();

        let new_count =
            sweep::sweep_once(&mut self.registry, &*self.hooks, &*self.prompt, &self.drain, show_errors);
        if new_count != self.last_job_count {
            self.last_job_count = new_count;
            self.hooks.job_count_changed(new_count);
            self.hooks.stats_redraw_later();
        }
    }

    /// Fire-and-forget external command. Returns the parent-side stdin
    /// stream when `want_input` is set; the job itself is still tracked in
    /// the registry and swept by `check`, it just isn't returned as a
    /// handle the caller can query.
    pub fn run_external(
        &mut self,
        cmd: &str,
        keep_in_fg: bool,
        skip_errors: bool,
        requester: ShellRequester,
        want_input: bool,
    ) -> Result<Option<std::process::ChildStdin>, SpawnError> {
        let (shell, shell_flag) = self.shell_and_flag(requester);
        let mut flags = SpawnFlags::MENU_VISIBLE;
        if keep_in_fg {
            flags |= SpawnFlags::KEEP_IN_FG;
        }
        if want_input {
            flags |= SpawnFlags::SUPPLY_INPUT;
        }

        let mut spawned = bgjobs_adapters::spawn(&shell, &shell_flag, cmd, None, flags)?;
        let input = spawned.stdin.take();

        let job = Arc::new(job::Job::new_command(
            self.id_gen.next(),
            cmd.to_string(),
            true,
            skip_errors,
        ));
        job.attach_child(spawned.child, None, spawned.stdout, spawned.stderr);
        self.wire_error_stream(&job);
        self.registry.insert(job);

        Ok(input)
    }

    /// Spawns `cmd` and returns a refcounted handle so the caller can poll,
    /// cancel, terminate, or wait on it. Error reporting is always opted
    /// out (`skip_errors = true`) since the caller owns observing failure
    /// through the handle instead.
    pub fn run_external_job(
        &mut self,
        cmd: &str,
        flags: SpawnFlags,
        descr: &str,
        pwd: Option<&Path>,
        requester: ShellRequester,
    ) -> Result<JobHandle, SpawnError> {
        let (shell, shell_flag) = self.shell_and_flag(requester);
        let spawned = bgjobs_adapters::spawn(&shell, &shell_flag, cmd, pwd, flags)?;

        let job = Arc::new(job::Job::new_command(
            self.id_gen.next(),
            descr.to_string(),
            flags.contains(SpawnFlags::MENU_VISIBLE),
            true,
        ));
        job.attach_child(spawned.child, spawned.stdin, spawned.stdout, spawned.stderr);

        if flags.contains(SpawnFlags::JOB_BAR_VISIBLE) {
            self.hooks.job_bar_add(descr);
            job.set_on_job_bar(true);
        }
        self.wire_error_stream(&job);
        self.registry.insert(Arc::clone(&job));

        tracing::info!(job_id = %job.id, cmd, "spawned command job");
        Ok(JobHandle::new(job))
    }

    /// Runs `func` on a dedicated OS thread as a `Task` (informational,
    /// `important = false`) or `Operation` (shown on the progress bar).
    pub fn execute<F, A>(
        &mut self,
        descr: &str,
        op_descr: &str,
        total: u64,
        important: bool,
        func: F,
        args: A,
    ) -> Result<JobHandle, ExecuteError>
    where
        F: FnOnce(&ProgressHandle, A) + Send + 'static,
        A: Send + 'static,
    {
        let kind = if important {
            JobKind::Operation
        } else {
            JobKind::Task
        };
        let job = Arc::new(job::Job::new_worker(
            self.id_gen.next(),
            kind,
            descr.to_string(),
            total,
            true,
        ));
        if let Some(op) = job.bg_op() {
            op.set_descr(op_descr);
        }
        if important {
            self.hooks.job_bar_add(descr);
            job.set_on_job_bar(true);
        }

        self.registry.insert(Arc::clone(&job));
        match bootstrap::spawn_worker(Arc::clone(&job), func, args) {
            Ok(()) => Ok(JobHandle::new(job)),
            Err(err) => {
                job.mark_finished(1);
                Err(err)
            }
        }
    }

    /// Bounded poll (~50 ms) waking the drain worker each iteration,
    /// waiting for a stopped command's error stream to finish draining.
    /// Returns `true` if it finished before the deadline.
    pub fn wait_errors(&self, handle: &JobHandle) -> bool {
        const STEP: std::time::Duration = std::time::Duration::from_micros(50);
        const BUDGET: std::time::Duration = std::time::Duration::from_millis(50);
        let deadline = std::time::Instant::now() + BUDGET;
        while handle.job().is_erroring() {
            self.drain.nudge();
            if std::time::Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(STEP);
        }
        true
    }

    pub fn job_count(&self) -> usize {
        self.registry.job_count()
    }

    pub fn has_active_jobs(&self, important_only: bool) -> bool {
        self.registry.has_active(important_only)
    }

    /// If `job` was spawned with a live (non-merged) error stream, marks it
    /// erroring and hands it off to the drain worker.
    fn wire_error_stream(&self, job: &Arc<job::Job>) {
        if job.has_err_stream() {
            job.mark_erroring();
            self.drain.submit(Arc::clone(job));
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
