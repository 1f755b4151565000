//! Hardened subprocess execution
//!
//! Provides command execution with:
//! - Concurrent stdout/stderr draining (no pipe-buffer deadlocks)
//! - Timeout support with graceful-then-forced termination
//! - Byte-exact output capture with lossy text accessors
//! - Working directory and environment control

pub mod output;
pub mod runner;
pub mod spec;

pub use output::{OutputCapture, ProcessResult};
pub use runner::{
    run_command, run_command_blocking, ProcessRunner, DEFAULT_GRACE_WINDOW,
};
pub use spec::CommandSpec;
