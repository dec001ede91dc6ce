// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job kinds and the shell-requester distinction used when spawning commands.

/// What a tracked job actually is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// An external child process launched through the configured shell.
    Command,
    /// An in-process worker running auxiliary, non-critical work.
    ///
    /// Never shown on the progress bar.
    Task,
    /// An in-process worker running important work (copy/move/delete).
    ///
    /// Shown on the progress bar and counted by [`crate::JobKind::is_operation`].
    Operation,
}

impl JobKind {
    pub fn is_command(self) -> bool {
        matches!(self, JobKind::Command)
    }

    pub fn is_operation(self) -> bool {
        matches!(self, JobKind::Operation)
    }
}

/// Who asked for a command to be run, which determines which shell flag is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellRequester {
    /// A human-facing command, run through the configured interactive shell flag.
    User,
    /// An internally constructed command, always run with a portable `-c`/`/C` flag.
    App,
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
