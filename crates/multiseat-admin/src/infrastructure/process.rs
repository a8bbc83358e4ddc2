//! Async external command runner.
//!
//! Every OS command the tool issues goes through [`CommandRunner::run`], which:
//!
//! 1. Spawns the program as a tokio child process with stdout/stderr piped.
//! 2. Waits at most `timeout`; on expiry the child is killed (the future owning
//!    it is dropped and `kill_on_drop` is set) and `CommandError::Timeout` is
//!    returned.
//! 3. Maps exit status 0 to [`CommandOutput`] and anything else to
//!    `CommandError::NonZeroExit` carrying stdout followed by stderr.
//!
//! On Windows the child is created without a console window so PowerShell and
//! `net.exe` do not flash a terminal in front of the operator.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::application::command::{CommandError, CommandOutput};

/// Default limit for a single external command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

#[derive(Debug, Clone, Copy)]
pub struct CommandRunner {
    timeout: Duration,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Runs `program` with `args` and waits for it to finish.
    ///
    /// # Errors
    ///
    /// See the module docs for the mapping to [`CommandError`] variants.
    pub async fn run<I, S>(&self, program: &str, args: I) -> Result<CommandOutput, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(target_os = "windows")]
        command.creation_flags(CREATE_NO_WINDOW);

        debug!("running {program} (timeout {:?})", self.timeout);
        let child = command.spawn().map_err(|source| launch_error(program, source))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| launch_error(program, source))?,
            Err(_) => {
                return Err(CommandError::Timeout {
                    program: program.to_string(),
                    timeout: self.timeout,
                })
            }
        };

        let captured = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if output.status.success() {
            Ok(captured)
        } else {
            Err(CommandError::NonZeroExit {
                program: program.to_string(),
                code: output.status.code(),
                output: captured.combined(),
            })
        }
    }
}

fn launch_error(program: &str, source: std::io::Error) -> CommandError {
    if source.kind() == ErrorKind::NotFound {
        CommandError::NotFound {
            program: program.to_string(),
        }
    } else {
        CommandError::Launch {
            program: program.to_string(),
            source,
        }
    }
}
