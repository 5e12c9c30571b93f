use crate::shared::error::SbomError;
use crate::shared::Result;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Interval between exit checks while a deadline is pending
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs external commands and captures their standard output
///
/// stdout and stderr are drained on helper threads so a chatty command cannot
/// block on a full pipe while we wait for it. With a timeout configured, a
/// command that is still running at the deadline is killed and reported as
/// [`SbomError::CommandTimeout`].
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Option<Duration>,
}

impl CommandRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Runs `program` with `args` and returns its stdout (lossily decoded as UTF-8)
    ///
    /// # Errors
    /// - [`SbomError::CommandFailed`] if the command cannot be launched or exits non-zero
    /// - [`SbomError::CommandTimeout`] if the command outlives the timeout
    pub fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command_line = display_command(program, args);
        tracing::debug!(command = %command_line, "running command");

        let mut child = Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SbomError::CommandFailed {
                command: command_line.clone(),
                details: format!("failed to launch: {}", e),
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.timeout {
            Some(timeout) => match wait_with_deadline(&mut child, timeout, &command_line)? {
                Some(status) => status,
                None => {
                    return Err(SbomError::CommandTimeout {
                        command: command_line,
                        timeout,
                    }
                    .into())
                }
            },
            None => child.wait().map_err(|e| SbomError::CommandFailed {
                command: command_line.clone(),
                details: format!("failed to wait for command: {}", e),
            })?,
        };

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if !status.success() {
            return Err(SbomError::CommandFailed {
                command: command_line,
                details: format!(
                    "{}; stderr: {}",
                    status,
                    String::from_utf8_lossy(&stderr).trim()
                ),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            if let Err(e) = pipe.read_to_end(&mut buffer) {
                tracing::debug!(error = %e, "failed to read command output");
            }
        }
        buffer
    })
}

/// Waits for the child until the deadline; `Ok(None)` means it was killed.
fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
    command_line: &str,
) -> Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        let polled = child.try_wait().map_err(|e| SbomError::CommandFailed {
            command: command_line.to_string(),
            details: format!("failed to wait for command: {}", e),
        })?;
        if let Some(status) = polled {
            return Ok(Some(status));
        }

        let now = Instant::now();
        if now >= deadline {
            if let Err(e) = child.kill() {
                tracing::debug!(command = command_line, error = %e, "failed to kill timed out command");
            }
            // Reap the killed process; its exit status is irrelevant.
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}
