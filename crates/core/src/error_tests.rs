use super::*;

#[test]
fn spawn_error_messages_are_descriptive() {
    let err = SpawnError::InvalidCwd(PathBuf::from("/no/such/dir"));
    assert!(err.to_string().contains("/no/such/dir"));
}

#[test]
fn execute_error_spawn_wraps_io_error() {
    let io_err = std::io::Error::other("boom");
    let err = ExecuteError::Spawn(io_err);
    assert!(err.to_string().contains("failed to spawn worker"));
}
