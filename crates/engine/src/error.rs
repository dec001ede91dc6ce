// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by the engine's public API.

use thiserror::Error;

/// Failure constructing a [`crate::Jobs`] handle.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to start error-drain worker: {0}")]
    DrainWorker(#[source] std::io::Error),
}
