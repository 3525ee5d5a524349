//! Search for arithmetic expressions over a set of numbers
//!
//! - [`engine`]: the canonical recursive search, single threaded
//! - [`rules`]: which combinations of two values the engine keeps
//! - [`parallel`]: a worker pool that forks one search across threads or
//!   streams independent jobs to them
//! - [`draws`]: the standard six-tile draws used by `--generate`

pub mod config;
pub mod draws;
pub mod engine;
pub mod job;
pub mod parallel;
pub mod result;
pub mod rules;

pub use config::{SearchConfig, ThreadCount};
pub use job::Job;
pub use parallel::{ParallelConfig, Scheduler};
pub use result::SearchStatistics;

use crate::error::Result;
use crate::expr::{Number, Target};

/// Stream one job per draw through the pool, all against `range`.
pub fn run_generate<I>(scheduler: &Scheduler, range: Target, draws: I) -> Result<u64>
where
    I: IntoIterator<Item = Vec<Number>>,
{
    let mut submitted = 0;
    for numbers in draws {
        scheduler.submit(Job::new(range, numbers)?);
        submitted += 1;
    }
    scheduler.drain();
    tracing::debug!(draws = submitted, range = %range, "generate finished");
    Ok(submitted)
}
