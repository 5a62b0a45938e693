//! Error types for adb invocations

use std::time::Duration;
use thiserror::Error;

/// Failure of a single adb invocation.
///
/// `CommandFailed` covers everything where the process ran (or could not be
/// started) and did not succeed; `TimeoutExpired` means the process was
/// killed because it outlived its bound.
#[derive(Error, Debug)]
pub enum AdbError {
    #[error("adb command failed{} ({}): `{command}`{}", on_device(.selector), describe_status(.status), describe_output(.output))]
    CommandFailed {
        /// Device selector the command was addressed to
        selector: Option<String>,
        /// Full command line that was run
        command: String,
        /// Exit code, `None` when the process never started or died by signal
        status: Option<i32>,
        /// Combined stdout/stderr with trailing newlines stripped
        output: String,
    },

    #[error("adb command timed out after {timeout:?}{}: `{command}`", on_device(.selector))]
    TimeoutExpired {
        selector: Option<String>,
        command: String,
        timeout: Duration,
    },
}

impl AdbError {
    /// Selector of the device the failed command targeted
    pub fn selector(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { selector, .. } | Self::TimeoutExpired { selector, .. } => {
                selector.as_deref()
            }
        }
    }

    /// Command line that failed
    pub fn command(&self) -> &str {
        match self {
            Self::CommandFailed { command, .. } | Self::TimeoutExpired { command, .. } => command,
        }
    }

    /// Captured output, empty for timeouts
    pub fn output(&self) -> &str {
        match self {
            Self::CommandFailed { output, .. } => output,
            Self::TimeoutExpired { .. } => "",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutExpired { .. })
    }
}

fn on_device(selector: &Option<String>) -> String {
    match selector {
        Some(id) => format!(" on device {}", id),
        None => String::new(),
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "no exit code".to_string(),
    }
}

fn describe_output(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!("\n{}", output)
    }
}

pub type Result<T> = std::result::Result<T, AdbError>;
