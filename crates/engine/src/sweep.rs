// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The foreground sweep: reap, drain reported errors through the prompt,
//! run exit callbacks, evict finished jobs.

use crate::drain::DrainHandle;
use crate::reaper;
use crate::registry::JobRegistry;
use bgjobs_core::{ErrorPrompt, JobBarHooks};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Discards a nested call to `check` instead of reentering it.
pub struct SweepGuard {
    flag: Arc<AtomicBool>,
}

impl SweepGuard {
    pub fn try_acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|()| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for SweepGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// One full sweep. Returns the recomputed `v:jobcount`-equivalent.
pub fn sweep_once(
    registry: &mut JobRegistry,
    hooks: &dyn JobBarHooks,
    prompt: &dyn ErrorPrompt,
    drain: &DrainHandle,
    show_errors: bool,
) -> usize {
    reaper::reap(registry);

    if registry.iter().any(|j| j.is_erroring()) {
        drain.nudge();
    }

    for job in registry.iter() {
        if show_errors && !job.skip_errors() {
            loop {
                let chunk = job.take_new_errors();
                if chunk.is_empty() {
                    break;
                }
                if prompt.prompt_error(&job.cmd, &chunk) {
                    job.set_skip_errors(true);
                }
            }
        }

        if !job.is_running() {
            if job.is_on_job_bar() {
                hooks.job_bar_remove(&job.cmd);
                job.set_on_job_bar(false);
            }
            if let Some(cb) = job.take_exit_cb() {
                cb(job);
            }
        }
    }

    let evicted = registry.evict_finished();
    tracing::debug!(count = evicted.len(), "sweep evicted finished jobs");
    drop(evicted);

    registry.job_count()
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
