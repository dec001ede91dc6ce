// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bgjobs-adapters: the platform spawn/reap/signal layer.
//!
//! Everything that actually touches an OS process lives here. Non-Windows
//! targets get pipe-based stdio wiring, session-leader detachment, and a
//! non-blocking `waitpid(-1, WNOHANG)` reaper; a Windows backend would mirror
//! this with `CreateProcessW` and a kernel job object, gated the same way.

#[cfg(unix)]
pub mod io;
#[cfg(unix)]
pub mod unix;

#[cfg(unix)]
pub use io::{poll_readable, PollOutcome, WakePipe, POLL_TIMEOUT_MS};
#[cfg(unix)]
pub use unix::{
    hard_terminate, reap_all, soft_cancel, spawn, ExitStatus, Signal, SpawnedChild,
    CANCEL_SIGNAL, TERMINATE_SIGNAL,
};
