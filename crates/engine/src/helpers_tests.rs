use super::*;
use bgjobs_core::Cancellation;
use std::sync::atomic::{AtomicBool, Ordering};

struct TestShell;

impl ShellConfig for TestShell {
    fn shell(&self) -> String {
        "/bin/sh".into()
    }
    fn shell_cmd_flag(&self) -> String {
        "-c".into()
    }
    fn fast_run(&self) -> bool {
        false
    }
}

struct NeverCancel;
impl Cancellation for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

struct AlreadyCancelled(AtomicBool);
impl Cancellation for AlreadyCancelled {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[test]
fn and_wait_for_errors_collects_stderr_and_exit_code() {
    let (code, errors) =
        and_wait_for_errors("printf boom 1>&2; exit 5", &TestShell, &NeverCancel).unwrap();
    assert_eq!(code, 5);
    assert_eq!(errors, "boom");
}

#[test]
fn and_wait_for_errors_terminates_on_cancellation() {
    let cancel = AlreadyCancelled(AtomicBool::new(true));
    let (code, _errors) =
        and_wait_for_errors("sleep 60", &TestShell, &cancel).unwrap();
    assert_eq!(code, 128 + bgjobs_adapters::Signal::SIGKILL as i32);
}

#[test]
fn run_and_capture_splits_stdout_and_stderr() {
    let (code, out, err) =
        run_and_capture("/bin/sh", "-c", "echo out; echo err 1>&2", None).unwrap();
    assert_eq!(code, 0);
    assert_eq!(out, "out\n");
    assert_eq!(err, "err\n");
}

#[test]
fn run_and_capture_feeds_supplied_input() {
    let (code, out, _err) =
        run_and_capture("/bin/sh", "-c", "cat", Some("hello")).unwrap();
    assert_eq!(code, 0);
    assert_eq!(out, "hello");
}
