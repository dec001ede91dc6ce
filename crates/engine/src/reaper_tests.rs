use super::*;
use crate::job::Job;
use bgjobs_core::{JobId, SpawnFlags};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn reap_marks_matching_job_finished() {
    let mut registry = JobRegistry::new();
    let spawned =
        bgjobs_adapters::spawn("/bin/sh", "-c", "exit 7", None, SpawnFlags::NONE).unwrap();
    let job = Arc::new(Job::new_command(JobId::new(1), "exit 7".into(), true, true));
    job.attach_child(spawned.child, spawned.stdin, spawned.stdout, spawned.stderr);
    registry.insert(job.clone());

    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while job.is_running() && std::time::Instant::now() < deadline {
        reap(&registry);
        std::thread::sleep(Duration::from_millis(10));
    }

    assert!(!job.is_running());
    assert_eq!(job.exit_code(), 7);
}

#[test]
fn reap_ignores_unknown_pids() {
    let registry = JobRegistry::new();
    reap(&registry);
}
