use super::*;
use bgjobs_core::JobId;

fn finished_job(id: u64, in_menu: bool) -> Arc<Job> {
    let job = Arc::new(Job::new_command(JobId::new(id), "true".into(), in_menu, true));
    job.mark_finished(0);
    job
}

#[test]
fn evict_finished_removes_only_jobs_with_no_holders() {
    let mut registry = JobRegistry::new();
    let done = finished_job(1, true);
    let held = finished_job(2, true);
    held.incref();
    registry.insert(Arc::clone(&done));
    registry.insert(Arc::clone(&held));

    let evicted = registry.evict_finished();
    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].id, done.id);
    assert_eq!(registry.len(), 1);
}

#[test]
fn job_count_only_counts_running_menu_jobs() {
    let mut registry = JobRegistry::new();
    let running = Arc::new(Job::new_command(JobId::new(1), "sleep".into(), true, true));
    let not_in_menu = Arc::new(Job::new_command(JobId::new(2), "sleep".into(), false, true));
    let stopped = finished_job(3, true);
    registry.insert(running);
    registry.insert(not_in_menu);
    registry.insert(stopped);

    assert_eq!(registry.job_count(), 1);
}

#[test]
fn find_by_pid_requires_attached_child() {
    let registry = JobRegistry::new();
    assert!(registry.find_by_pid(1234).is_none());
}

#[yare::parameterized(
    task_counts_as_active = { bgjobs_core::JobKind::Task, false, true },
    operation_counts_as_active = { bgjobs_core::JobKind::Operation, false, true },
    operation_counts_as_important = { bgjobs_core::JobKind::Operation, true, true },
    task_does_not_count_as_important = { bgjobs_core::JobKind::Task, true, false },
)]
fn has_active_respects_important_only(kind: bgjobs_core::JobKind, important_only: bool, expected: bool) {
    let mut registry = JobRegistry::new();
    registry.insert(Arc::new(Job::new_worker(JobId::new(1), kind, "w".into(), 1, false)));
    assert_eq!(registry.has_active(important_only), expected);
}
