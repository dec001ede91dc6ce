// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress and cancellation record shared between a worker and the UI.

use parking_lot::{Mutex, MutexGuard};

/// Progress fields for a [`crate::JobKind::Task`] or [`crate::JobKind::Operation`].
///
/// All fields are read and written exclusively through [`BgOp::lock`], which
/// hands out a guard over this struct; there is no field access outside the
/// guard so the lock can never be bypassed.
#[derive(Debug, Clone, Default)]
pub struct BgOpState {
    pub total: u64,
    pub done: u64,
    /// Cached `done / total` in the 0..=100 range, or `-1` when indeterminate.
    pub progress: i32,
    pub descr: Option<String>,
    pub cancelled: bool,
}

impl BgOpState {
    pub fn recompute_progress(&mut self) {
        self.progress = if self.total == 0 {
            -1
        } else {
            ((self.done.min(self.total) * 100) / self.total) as i32
        };
    }
}

/// A [`BgOpState`] behind its own lock, independent from a job's status and
/// error-buffer locks so progress updates never contend with either.
#[derive(Debug, Default)]
pub struct BgOp {
    inner: Mutex<BgOpState>,
}

impl BgOp {
    pub fn new(total: u64, descr: Option<String>) -> Self {
        let mut state = BgOpState {
            total,
            descr,
            ..Default::default()
        };
        state.recompute_progress();
        Self {
            inner: Mutex::new(state),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, BgOpState> {
        self.inner.lock()
    }

    pub fn set_done(&self, done: u64) {
        let mut g = self.inner.lock();
        g.done = done;
        g.recompute_progress();
    }

    pub fn set_descr(&self, descr: impl Into<String>) {
        self.inner.lock().descr = Some(descr.into());
    }

    pub fn cancel(&self) -> bool {
        let mut g = self.inner.lock();
        let was_cancelled = g.cancelled;
        g.cancelled = true;
        !was_cancelled
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.lock().cancelled
    }
}

#[cfg(test)]
#[path = "bg_op_tests.rs"]
mod tests;
