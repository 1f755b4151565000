//! toolbelt - Hardened Subprocess Execution and Utility Helpers
//!
//! A small reusable library centered on running external commands safely:
//!
//! - **Process execution** - spawn a command, capture stdout/stderr without
//!   pipe deadlocks, enforce timeouts with graceful-then-forced termination,
//!   and get a structured result or typed failure
//! - **Filesystem helpers** - path cleanup, existence assertions, temporary
//!   paths, directory trees
//! - **Shell helpers** - quoting and PATH lookup
//! - **CLI helpers** - permissive value parsers for clap
//! - **Logging setup** - tracing subscriber installation for binaries
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use toolbelt::{run_command, CommandSpec};
//!
//! # #[tokio::main]
//! # async fn main() -> toolbelt::Result<()> {
//! let spec = CommandSpec::new("echo")
//!     .arg("hello")
//!     .timeout(Duration::from_secs(5));
//!
//! let result = run_command(&spec).await?;
//! assert_eq!(result.exit_code, 0);
//! assert_eq!(result.stdout.text(), "hello\n");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod fs;
pub mod logging;
pub mod process;
pub mod shell;

pub use error::{Error, ErrorInfo, Result};
pub use logging::{init_logging, LogFormat, LogOptions};
pub use process::{
    run_command, run_command_blocking, CommandSpec, OutputCapture, ProcessResult, ProcessRunner,
    DEFAULT_GRACE_WINDOW,
};
pub use shell::{resolve_program, shell_escape};
