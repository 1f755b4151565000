//! Shell helpers
//!
//! Quoting for values interpolated into shell command strings, and PATH
//! lookup for callers that pre-check executables.

use std::path::PathBuf;

/// Quote `value` for interpolation into a double-quoted shell context
///
/// Wraps the value in double quotes and backslash-escapes the characters the
/// shell still interprets inside them.
pub fn shell_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '`' | '$' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('"');
    escaped
}

/// Resolve a program name against PATH
///
/// Returns the absolute path of the executable, or `None` when it is not on
/// PATH (or not executable).
pub fn resolve_program(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
