//! Logging setup
//!
//! Installs a `tracing` subscriber for binaries built on this library. The
//! library itself only emits events; it never installs a subscriber on its
//! own.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Options for [`init_logging`]
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Default filter directive when RUST_LOG is unset (e.g. "info")
    pub level: String,
    /// Event format
    pub format: LogFormat,
    /// Write to this file instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

impl LogOptions {
    /// Options with a given default level
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Emit JSON events
    pub fn json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }

    /// Write events to `path` instead of stderr
    pub fn to_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }
}

/// Install the global tracing subscriber
///
/// RUST_LOG overrides the configured default level. Fails if a subscriber is
/// already installed.
pub fn init_logging(options: &LogOptions) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match (&options.file, options.format) {
        (Some(path), LogFormat::Json) => {
            let file = std::fs::File::create(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .try_init()
        }
        (Some(path), LogFormat::Pretty) => {
            let file = std::fs::File::create(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .try_init()
        }
        (None, LogFormat::Json) => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        (None, LogFormat::Pretty) => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    installed.map_err(|e| {
        Error::Io(std::io::Error::other(format!(
            "failed to install tracing subscriber: {}",
            e
        )))
    })
}
