//! Transport-level outcome of running one external command.
//!
//! Every capability trait that is backed by an OS command (`DeviceQuerier`,
//! `AccountManager`, `NetworkSharer`) reports failures with [`CommandError`],
//! which keeps the four ways a command can go wrong apart:
//!
//! | Variant        | Meaning                                             |
//! |----------------|-----------------------------------------------------|
//! | `NotFound`     | The program is not on `PATH` (e.g. no PowerShell).  |
//! | `Launch`       | The OS refused to start the process.                |
//! | `Timeout`      | The process ran longer than the configured limit.   |
//! | `NonZeroExit`  | The process ran and reported failure.               |
//!
//! `NonZeroExit` carries the combined stdout + stderr text, which is what
//! `net.exe` uses to explain duplicate accounts or missing privileges.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("`{program}` was not found on this system")]
    NotFound { program: String },

    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("`{program}` exited with {}: {}", display_code(.code), .output.trim())]
    NonZeroExit {
        program: String,
        /// `None` when the process was terminated by a signal.
        code: Option<i32>,
        /// Combined stdout and stderr.
        output: String,
    },
}

impl CommandError {
    /// Combined output of a failed run, if the process got far enough to print any.
    pub fn output(&self) -> Option<&str> {
        match self {
            CommandError::NonZeroExit { output, .. } => Some(output),
            _ => None,
        }
    }

    /// Whether the failure happened before the process produced an exit status.
    pub fn is_transport(&self) -> bool {
        !matches!(self, CommandError::NonZeroExit { .. })
    }
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code".to_string(),
    }
}

/// Captured result of a successful (exit code 0) command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout followed by stderr, the way a terminal would show them.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }
}
