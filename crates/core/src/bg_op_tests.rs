use super::*;

#[test]
fn progress_is_indeterminate_with_zero_total() {
    let op = BgOp::new(0, None);
    assert_eq!(op.lock().progress, -1);
}

#[test]
fn progress_tracks_done_over_total() {
    let op = BgOp::new(10, Some("scan".into()));
    op.set_done(5);
    assert_eq!(op.lock().progress, 50);
}

#[test]
fn cancel_returns_true_only_on_first_call() {
    let op = BgOp::new(1, None);
    assert!(op.cancel());
    assert!(!op.cancel());
    assert!(op.is_cancelled());
}

#[test]
fn set_descr_replaces_description() {
    let op = BgOp::new(1, None);
    op.set_descr("counting files");
    assert_eq!(op.lock().descr.as_deref(), Some("counting files"));
}
