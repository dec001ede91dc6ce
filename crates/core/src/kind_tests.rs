use super::*;

#[test]
fn only_operation_counts_as_important() {
    assert!(JobKind::Operation.is_operation());
    assert!(!JobKind::Task.is_operation());
    assert!(!JobKind::Command.is_operation());
}

#[test]
fn only_command_is_command() {
    assert!(JobKind::Command.is_command());
    assert!(!JobKind::Task.is_command());
    assert!(!JobKind::Operation.is_command());
}
