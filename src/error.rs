//! Error types for argument validation and the worker pool

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, NumbersError>;

/// Errors reported before or around a search. The search itself cannot fail.
#[derive(Debug, Error)]
pub enum NumbersError {
    /// Malformed command line
    #[error("{0}")]
    Usage(String),

    /// Target is not a positive number or a `START..END` range
    #[error("target is not a valid numbers game target: {0}")]
    InvalidTarget(String),

    /// Source number is not a positive decimal integer
    #[error("not a valid numbers game number: {0}")]
    InvalidNumber(String),

    /// A job needs at least one source number
    #[error("need at least one number")]
    NoNumbers,

    /// More numbers than the used-number bitmask can track
    #[error("too many numbers: {count} given, at most {max} supported")]
    TooManyNumbers { count: usize, max: usize },

    /// Thread count resolved to zero
    #[error("thread count must be at least 1")]
    NoThreads,

    /// Worker thread could not be created
    #[error("failed to spawn worker thread {id}: {source}")]
    Spawn {
        id: usize,
        #[source]
        source: io::Error,
    },

    /// Worker thread panicked and could not be joined
    #[error("worker thread {0} panicked")]
    WorkerPanicked(usize),

    /// Writing solutions failed
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl NumbersError {
    /// True for errors caused by the command line rather than the system
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            NumbersError::Usage(_)
                | NumbersError::InvalidTarget(_)
                | NumbersError::InvalidNumber(_)
                | NumbersError::NoNumbers
        )
    }
}

/// Terminate the process after an unrecoverable failure inside the pool.
///
/// Once a lock is poisoned or a worker's wake channel is gone the pool's
/// shared state can no longer be trusted, so nothing is unwound.
pub fn fatal(context: impl fmt::Display) -> ! {
    tracing::error!("fatal: {}", context);
    eprintln!("numbers: fatal: {}", context);
    std::process::exit(1)
}
