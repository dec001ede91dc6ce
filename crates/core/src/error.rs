// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared across the job subsystem's crates.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to launch a [`crate::JobKind::Command`].
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("working directory {0:?} does not exist or is not a directory")]
    InvalidCwd(PathBuf),
    #[error("failed to create pipe: {0}")]
    Pipe(#[source] std::io::Error),
    #[error("failed to spawn {cmd:?}: {source}")]
    Exec {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to detach child into its own session: {0}")]
    Detach(#[source] std::io::Error),
}

/// Failure to launch a [`crate::JobKind::Task`] or [`crate::JobKind::Operation`].
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("failed to spawn worker: {0}")]
    Spawn(#[source] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
