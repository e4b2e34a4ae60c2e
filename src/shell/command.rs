//! Shell command execution.
//!
//! Checks that probe the machine (`pnpm --version`, `npm view ...`) go
//! through the [`CommandRunner`] trait so tests can substitute a recording
//! runner. [`ShellRunner`] is the production implementation.

use crate::error::{DaktariError, Result};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running command is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard error.
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Execute a shell command, capturing its standard error.
///
/// With a `timeout`, the command and everything it started are killed once
/// it runs longer than that.
pub fn execute(command: &str, timeout: Option<Duration>) -> Result<CommandResult> {
    let start = Instant::now();

    let shell = detect_shell();

    let mut cmd = Command::new(&shell);
    cmd.arg(shell_flag());
    cmd.arg(command);

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());

    detach_session(&mut cmd);

    let mut child = cmd.spawn().map_err(|_| DaktariError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    // Drain stderr on its own thread so a chatty command can't block on a
    // full pipe while we wait for it.
    let stderr_handle = child
        .stderr
        .take()
        .map(|err| thread::spawn(move || read_lossy(err)));

    let wait_failed = || DaktariError::CommandFailed {
        command: command.to_string(),
        code: None,
    };

    let status = match timeout {
        None => child.wait().map_err(|_| wait_failed())?,
        Some(timeout) => loop {
            if let Some(status) = child.try_wait().map_err(|_| wait_failed())? {
                break status;
            }
            if start.elapsed() >= timeout {
                kill_tree(&mut child);
                let _ = child.wait();
                tracing::debug!("Killed '{}' after {:?}", command, timeout);
                return Err(DaktariError::CommandTimedOut {
                    command: command.to_string(),
                    timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        },
    };

    let stderr = stderr_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();

    Ok(CommandResult {
        exit_code: status.code(),
        stderr,
        success: status.success(),
    })
}

/// Execute a command and return success/failure.
///
/// Spawn errors and timeouts count as failure.
pub fn execute_check(command: &str, timeout: Option<Duration>) -> bool {
    match execute(command, timeout) {
        Ok(result) => {
            if !result.success {
                tracing::debug!(
                    "'{}' exited with {:?}: {}",
                    command,
                    result.exit_code,
                    result.stderr.trim()
                );
            }
            result.success
        }
        Err(e) => {
            tracing::debug!("{}", e);
            false
        }
    }
}

/// Runs probe commands on behalf of checks.
pub trait CommandRunner {
    /// Run `command` and report whether it exited successfully.
    fn can_run(&self, command: &str) -> bool;
}

/// Runs commands through the user's shell.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    timeout: Option<Duration>,
}

impl ShellRunner {
    /// Create a runner with no timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill probes that run longer than `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl CommandRunner for ShellRunner {
    fn can_run(&self, command: &str) -> bool {
        execute_check(command, self.timeout)
    }
}

/// Start the shell as the leader of a new session.
///
/// Its process group then holds everything the probe starts, and with no
/// controlling terminal `-i` can't stop the shell waiting for the foreground.
#[cfg(unix)]
fn detach_session(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;

    // SAFETY: setsid() is async-signal-safe and touches no parent state
    unsafe {
        cmd.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(std::io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

#[cfg(not(unix))]
fn detach_session(_cmd: &mut Command) {}

/// Kill the command along with every process in its group.
#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    // SAFETY: killpg() only sends a signal; the group id is our child's pid
    let killed = unsafe { libc::killpg(child.id() as libc::pid_t, libc::SIGKILL) } == 0;
    if !killed {
        let _ = child.kill();
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}

fn read_lossy(mut reader: impl Read) -> String {
    let mut buf = Vec::new();
    let _ = reader.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Detect the current shell.
fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

/// Get the flag to pass commands to the shell.
///
/// Uses `-lic` (interactive login shell) on Unix so that tools activated
/// in `.zshrc`/`.bashrc` (nvm, mise, asdf) are on PATH when probed.
///
/// In CI environments, uses `-lc` to avoid `cannot set terminal process
/// group` errors caused by `-i` without a TTY.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else if super::is_ci() {
        "-lc"
    } else {
        "-lic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_successful_command() {
        let result = execute("echo hello", None).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("exit 1", None).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn execute_captures_stderr() {
        let result = execute("echo oops >&2; exit 2", None).unwrap();

        assert_eq!(result.exit_code, Some(2));
        assert!(result.stderr.contains("oops"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_times_out() {
        let err = execute("sleep 5", Some(Duration::from_millis(200))).unwrap_err();

        assert!(matches!(
            err,
            DaktariError::CommandTimedOut { timeout, .. } if timeout == Duration::from_millis(200)
        ));
        assert!(err.to_string().starts_with("Command timed out after 200ms"));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_kills_processes_started_by_the_command() {
        let marker = format!(
            "daktari_timeout_marker_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );
        // The inner sh is a grandchild that carries the marker in its argv
        let command = format!("sh -c 'sleep 7; echo {marker}'; sleep 7 # {marker}");

        let err = execute(&command, Some(Duration::from_millis(300))).unwrap_err();
        assert!(matches!(err, DaktariError::CommandTimedOut { .. }));

        thread::sleep(Duration::from_millis(300));

        let Ok(ps) = Command::new("ps").args(["-eo", "args"]).output() else {
            return;
        };
        let listing = String::from_utf8_lossy(&ps.stdout);
        let survivors: Vec<&str> = listing.lines().filter(|l| l.contains(&marker)).collect();
        assert!(survivors.is_empty(), "still running: {:?}", survivors);
    }

    #[test]
    fn execute_check_returns_bool() {
        assert!(execute_check("exit 0", None));
        assert!(!execute_check("exit 1", None));
    }

    #[test]
    fn shell_runner_reports_exit_status() {
        let runner = ShellRunner::with_timeout(Duration::from_secs(30));
        assert_eq!(runner.timeout(), Some(Duration::from_secs(30)));
        assert!(runner.can_run("exit 0"));
        assert!(!runner.can_run("exit 3"));
    }

    #[test]
    fn shell_runner_missing_binary_fails() {
        assert!(!ShellRunner::new().can_run("daktari-definitely-not-a-real-binary --version"));
    }
}
