// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Peripheral blocking helpers that never touch the job registry or the
//! drain worker: `and_wait_for_errors` and `run_and_capture`.

use bgjobs_core::{Cancellation, ShellConfig, SpawnError, SpawnFlags};
use std::io::{Read, Write};
use std::time::Duration;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs `cmd` to completion, blocking the caller, and returns its exit code
/// once all stderr has been collected. If `cancellation` reports cancelled
/// partway through, the child is hard-terminated and the last known exit
/// code (-1 if never observed) is returned.
///
/// Not part of the job registry: nothing here is observable through
/// `check`, the jobs menu, or the error-drain worker.
pub fn and_wait_for_errors(
    cmd: &str,
    shell_config: &dyn ShellConfig,
    cancellation: &dyn Cancellation,
) -> Result<(i32, String), SpawnError> {
    let mut spawned = bgjobs_adapters::spawn(
        &shell_config.shell(),
        &shell_config.shell_cmd_flag(),
        cmd,
        None,
        SpawnFlags::NONE,
    )?;

    let mut stderr = spawned.stderr.take();
    let mut errors = String::new();

    loop {
        if let Some(stream) = stderr.as_mut() {
            let mut buf = [0u8; 1023];
            match stream.read(&mut buf) {
                Ok(0) => {}
                Ok(n) => {
                    errors.push_str(&String::from_utf8_lossy(&buf[..n]));
                    continue;
                }
                Err(_) => {}
            }
        }

        if cancellation.is_cancelled() {
            let pid = spawned.child.id() as i32;
            let _ = bgjobs_adapters::hard_terminate(pid);
        }

        match spawned.child.try_wait() {
            Ok(Some(status)) => {
                #[cfg(unix)]
                let code = {
                    use std::os::unix::process::ExitStatusExt;
                    status.code().unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
                };
                #[cfg(not(unix))]
                let code = status.code().unwrap_or(-1);
                return Ok((code, errors));
            }
            Ok(None) => std::thread::sleep(CANCEL_POLL_INTERVAL),
            Err(_) => return Ok((-1, errors)),
        }
    }
}

/// Spawns `cmd`, optionally feeding `input` to its stdin, and collects
/// stdout/stderr separately. Blocks until the child exits.
pub fn run_and_capture(
    shell: &str,
    shell_flag: &str,
    cmd: &str,
    input: Option<&str>,
) -> Result<(i32, String, String), SpawnError> {
    let mut flags = SpawnFlags::CAPTURE_OUT;
    if input.is_some() {
        flags |= SpawnFlags::SUPPLY_INPUT;
    }
    let mut spawned = bgjobs_adapters::spawn(shell, shell_flag, cmd, None, flags)?;

    if let (Some(data), Some(mut stdin)) = (input, spawned.stdin.take()) {
        let _ = stdin.write_all(data.as_bytes());
    }

    let mut out = String::new();
    if let Some(mut stdout) = spawned.stdout.take() {
        let _ = stdout.read_to_string(&mut out);
    }
    let mut err = String::new();
    if let Some(mut stderr) = spawned.stderr.take() {
        let _ = stderr.read_to_string(&mut err);
    }

    let status = spawned
        .child
        .wait()
        .map_err(|source| SpawnError::Exec {
            cmd: cmd.to_string(),
            source,
        })?;
    #[cfg(unix)]
    let code = {
        use std::os::unix::process::ExitStatusExt;
        status.code().unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
    };
    #[cfg(not(unix))]
    let code = status.code().unwrap_or(-1);

    Ok((code, out, err))
}

#[cfg(test)]
#[path = "helpers_tests.rs"]
mod tests;
