//! Error types for toolbelt
//!
//! One crate-wide error enum covering process execution failures and the
//! filesystem helpers, plus a serializable summary for callers that report
//! outcomes as JSON.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::process::OutputCapture;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for toolbelt operations
///
/// Process outcomes follow a strict taxonomy: an empty spec fails before
/// anything is launched, a spawn failure carries no output, a timeout carries
/// whatever output was captured before the kill, and a signal death is
/// reported distinctly from a timeout-induced kill.
#[derive(Error, Debug)]
pub enum Error {
    /// Command spec had no program to execute
    #[error("empty command: no program to execute")]
    EmptyCommand,

    /// Failed to launch the command (missing or unexecutable program)
    #[error("failed to launch command: {command}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Command exceeded its deadline and was killed
    #[error("command timed out after {limit:?}: {command}")]
    Timeout {
        command: String,
        limit: Duration,
        stdout: OutputCapture,
        stderr: OutputCapture,
        duration: Duration,
    },

    /// Command was killed by a signal this runner did not send
    #[error("command terminated by signal {signal}: {command}")]
    Signal {
        command: String,
        signal: i32,
        stdout: OutputCapture,
        stderr: OutputCapture,
        duration: Duration,
    },

    /// Path does not exist
    #[error("path does not exist: {path}")]
    PathNotFound { path: String },

    /// Path exists but is not a file
    #[error("not a file: {path}")]
    NotAFile { path: String },

    /// Path exists but is not a directory
    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializable error summary for logging/reporting callers
#[derive(Debug, Serialize, Clone)]
pub struct ErrorInfo {
    pub message: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl From<&Error> for ErrorInfo {
    fn from(err: &Error) -> Self {
        match err {
            Error::EmptyCommand => ErrorInfo {
                message: err.to_string(),
                kind: "empty_command".to_string(),
                signal: None,
                stdout: None,
                stderr: None,
            },
            Error::Launch { .. } => ErrorInfo {
                message: err.to_string(),
                kind: "launch_failed".to_string(),
                signal: None,
                stdout: None,
                stderr: None,
            },
            Error::Timeout { stdout, stderr, .. } => ErrorInfo {
                message: err.to_string(),
                kind: "timeout".to_string(),
                signal: None,
                stdout: Some(stdout.text().into_owned()),
                stderr: Some(stderr.text().into_owned()),
            },
            Error::Signal {
                signal,
                stdout,
                stderr,
                ..
            } => ErrorInfo {
                message: err.to_string(),
                kind: "signal".to_string(),
                signal: Some(*signal),
                stdout: Some(stdout.text().into_owned()),
                stderr: Some(stderr.text().into_owned()),
            },
            Error::PathNotFound { .. } => ErrorInfo {
                message: err.to_string(),
                kind: "path_not_found".to_string(),
                signal: None,
                stdout: None,
                stderr: None,
            },
            Error::NotAFile { .. } => ErrorInfo {
                message: err.to_string(),
                kind: "not_a_file".to_string(),
                signal: None,
                stdout: None,
                stderr: None,
            },
            Error::NotADirectory { .. } => ErrorInfo {
                message: err.to_string(),
                kind: "not_a_directory".to_string(),
                signal: None,
                stdout: None,
                stderr: None,
            },
            Error::Io(_) => ErrorInfo {
                message: err.to_string(),
                kind: "io_error".to_string(),
                signal: None,
                stdout: None,
                stderr: None,
            },
        }
    }
}
