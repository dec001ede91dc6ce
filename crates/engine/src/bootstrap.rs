// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launches the worker actor backing a [`bgjobs_core::JobKind::Task`] or
//! [`bgjobs_core::JobKind::Operation`].

use crate::handle::ProgressHandle;
use crate::job::Job;
use bgjobs_core::ExecuteError;
use std::sync::Arc;

/// Runs `func` to completion on a dedicated OS thread, then marks the job
/// finished with exit code 0. `func` panicking is treated the same as any
/// other worker failure would be in this crate: propagated as a thread panic
/// rather than swallowed, since silently losing a copy/move failure would
/// be worse than a loud one.
///
/// Returns `Err` if the thread itself could not be spawned (e.g. the OS is
/// out of resources); the caller is responsible for marking the job
/// finished in that case, since this function never touches `job` before
/// the thread is confirmed running.
pub fn spawn_worker<F, A>(job: Arc<Job>, func: F, args: A) -> Result<(), ExecuteError>
where
    F: FnOnce(&ProgressHandle, A) + Send + 'static,
    A: Send + 'static,
{
    let progress = ProgressHandle::new(Arc::clone(&job));
    let span = tracing::info_span!("job_worker", job_id = %job.id, kind = ?job.kind);
    std::thread::Builder::new()
        .name(format!("bgjobs-worker-{}", job.id))
        .spawn(move || {
            let _enter = span.enter();
            let start = std::time::Instant::now();
            func(&progress, args);
            tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "worker finished");
            job.mark_finished(0);
        })
        .map(|_handle| ())
        .map_err(ExecuteError::Spawn)
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
