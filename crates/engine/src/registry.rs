// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job collection. Owned exclusively by the foreground; every mutating
//! method takes `&mut self` so a second thread touching it is a compile
//! error rather than a runtime race.

use crate::job::Job;
use std::sync::Arc;

#[derive(Default)]
pub struct JobRegistry {
    jobs: Vec<Arc<Job>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, job: Arc<Job>) {
        self.jobs.push(job);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Job>> {
        self.jobs.iter()
    }

    pub fn find_by_pid(&self, pid: i32) -> Option<&Arc<Job>> {
        self.jobs.iter().find(|j| j.pid() == Some(pid))
    }

    /// Removes every job for which `can_remove()` holds, returning them so
    /// the caller can run exit callbacks and release platform resources.
    pub fn evict_finished(&mut self) -> Vec<Arc<Job>> {
        let (keep, evicted): (Vec<_>, Vec<_>) =
            self.jobs.drain(..).partition(|j| !j.can_remove());
        self.jobs = keep;
        evicted
    }

    /// `v:jobcount`: running jobs that are listed in the jobs menu.
    pub fn job_count(&self) -> usize {
        self.jobs.iter().filter(|j| j.in_menu && j.is_running()).count()
    }

    pub fn has_active(&self, important_only: bool) -> bool {
        self.jobs.iter().any(|j| {
            j.is_running()
                && if important_only {
                    j.kind.is_operation()
                } else {
                    !j.kind.is_command()
                }
        })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
