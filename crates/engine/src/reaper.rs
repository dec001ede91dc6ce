// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Non-blocking reaping of finished children, driven exclusively from the
//! foreground sweep.

use crate::registry::JobRegistry;

/// Drains every terminated child with `waitpid(-1, WNOHANG)` and marks the
/// matching job finished.
///
/// Must only be called from the sweep: interleaving this with any other
/// reaper (including a second concurrent call) races on which thread
/// observes a given pid.
pub fn reap(registry: &JobRegistry) {
    for (pid, status) in bgjobs_adapters::reap_all() {
        match registry.find_by_pid(pid) {
            Some(job) => {
                tracing::debug!(job_id = %job.id, pid, exit_code = status.code(), "child reaped");
                job.mark_finished(status.code());
            }
            None => {
                tracing::debug!(pid, "reaped unknown pid, ignoring");
            }
        }
    }
}

#[cfg(test)]
#[path = "reaper_tests.rs"]
mod tests;
