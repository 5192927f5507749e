//! The driver-wide error taxonomy.
//!
//! Every failure the harness can observe is one of these variants. None of
//! them is retried: a failed phase marks the benchmark run as failed and the
//! harness moves on to its next scheduled run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the platform driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A required executable or configuration key is missing or unusable.
    #[error("setup check failed: {0}")]
    Setup(String),

    /// The external executable could not be started at all (missing file,
    /// permission denied, not an executable).
    #[error("failed to launch {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external executable started but exited non-zero, or was killed
    /// by a signal before producing an exit code.
    #[error("{phase} exited with code {code}")]
    Execution { phase: &'static str, code: i32 },

    /// The runner log never contained the processing-time marker, typically
    /// because the job crashed before the engine logged it.
    #[error("no processing-time marker found under {}", log_dir.display())]
    MetricNotFound { log_dir: PathBuf },

    /// The platform log file could not be opened, written, or flushed.
    #[error("platform log I/O failed: {0}")]
    LogSink(#[source] std::io::Error),
}
