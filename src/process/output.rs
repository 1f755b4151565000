//! Captured process output and the final execution result
//!
//! Output is held as raw bytes: external tools are not guaranteed to emit
//! valid UTF-8, so decoding is deferred to lossy accessors instead of being
//! imposed at capture time.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// Raw bytes captured from one output stream (stdout or stderr)
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OutputCapture {
    bytes: Vec<u8>,
}

impl OutputCapture {
    /// The captured bytes, exactly as the process wrote them
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes captured
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether anything was captured
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lossy text view: undecodable byte sequences become U+FFFD
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Lossy text view with surrounding whitespace removed
    pub fn text_trimmed(&self) -> String {
        self.text().trim().to_string()
    }
}

impl From<Vec<u8>> for OutputCapture {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl fmt::Debug for OutputCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OutputCapture").field(&self.text()).finish()
    }
}

impl Serialize for OutputCapture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text())
    }
}

/// Result of running a command to completion
///
/// A non-zero exit code is still a result at this layer; callers inspect the
/// code themselves.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    /// Exit code reported by the process
    pub exit_code: i32,
    /// Captured standard output
    pub stdout: OutputCapture,
    /// Captured standard error
    pub stderr: OutputCapture,
    /// Wall-clock time from just before launch to just after the drain
    #[serde(rename = "duration_ms", serialize_with = "duration_ms")]
    pub duration: Duration,
    /// Whether the command timed out
    pub timed_out: bool,
}

impl ProcessResult {
    /// Whether the process exited with code 0
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

fn duration_ms<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
