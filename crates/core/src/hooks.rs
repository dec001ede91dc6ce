// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traits the embedding application implements so the job subsystem can
//! reach the UI and configuration without depending on either directly.

use crate::bg_op::BgOpState;

/// Progress-bar widget callbacks, driven from the foreground sweep.
pub trait JobBarHooks: Send + Sync {
    /// A new operation should be added to the progress bar.
    fn job_bar_add(&self, descr: &str);
    /// An operation has finished or been cancelled and should be removed.
    fn job_bar_remove(&self, descr: &str);
    /// An operation's progress or description changed; repaint if visible.
    fn job_bar_changed(&self, state: &BgOpState);
    /// Hint that the status line (job count, etc.) should be redrawn soon.
    fn stats_redraw_later(&self);
    /// The number of jobs counted toward the jobs-menu total changed.
    fn job_count_changed(&self, new_count: usize);
}

/// Modal error prompt shown by [`check`](crate) when a command produced
/// stderr output.
pub trait ErrorPrompt: Send + Sync {
    /// Show `body` under `title`; return `true` if the user asked to never
    /// be prompted again for this job.
    fn prompt_error(&self, title: &str, body: &str) -> bool;
}

/// Shell invocation configuration supplied by the embedder.
pub trait ShellConfig: Send + Sync {
    /// Path or name of the shell executable, e.g. `/bin/sh` or `cmd.exe`.
    fn shell(&self) -> String;
    /// The flag that introduces an inline command for [`crate::ShellRequester::User`]
    /// invocations, e.g. `-c` or `/C`.
    fn shell_cmd_flag(&self) -> String;
    /// Whether to skip the shell entirely for trivial, argument-free commands.
    fn fast_run(&self) -> bool;
}

/// Polled by blocking helpers (e.g. the foreground-only `and_wait_for_errors`)
/// to learn that the surrounding operation should abort early.
pub trait Cancellation: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
