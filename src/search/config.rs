//! Configuration types for solving runs

use crate::error::{NumbersError, Result};
use crate::expr::{PrintStyle, Target};
use crate::search::parallel::config::DEFAULT_FORK_MARGIN;

/// How many worker threads to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadCount {
    /// One worker per logical CPU
    #[default]
    Cpus,
    /// One worker per source number
    Numbers,
    /// An explicit count
    Fixed(usize),
}

impl ThreadCount {
    /// Resolve to a worker count for jobs of `number_count` numbers
    pub fn resolve(self, number_count: usize) -> Result<usize> {
        let count = match self {
            ThreadCount::Cpus => num_cpus::get(),
            ThreadCount::Numbers => number_count,
            ThreadCount::Fixed(count) => count,
        };
        if count == 0 {
            return Err(NumbersError::NoThreads);
        }
        Ok(count)
    }
}

impl std::fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreadCount::Cpus => write!(f, "cpus"),
            ThreadCount::Numbers => write!(f, "numbers"),
            ThreadCount::Fixed(count) => write!(f, "{}", count),
        }
    }
}

impl std::str::FromStr for ThreadCount {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cpus" | "cpu" => Ok(ThreadCount::Cpus),
            "numbers" => Ok(ThreadCount::Numbers),
            other => other.parse::<usize>().map(ThreadCount::Fixed).map_err(|_| {
                format!(
                    "Invalid thread count: '{}'. Valid options: a number, cpus, numbers",
                    s
                )
            }),
        }
    }
}

/// Main solving configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Output style for solutions
    pub style: PrintStyle,
    /// Worker thread count
    pub threads: ThreadCount,
    /// Target range used by `--generate`
    pub generate_range: Target,
    /// Placed-number margin below which workers stop forking
    pub fork_margin: usize,
    /// Verbose output during the run
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            style: PrintStyle::default(),
            threads: ThreadCount::default(),
            generate_range: Target::STANDARD,
            fork_margin: DEFAULT_FORK_MARGIN,
            verbose: false,
        }
    }
}

impl SearchConfig {
    pub fn with_style(mut self, style: PrintStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_threads(mut self, threads: ThreadCount) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_generate_range(mut self, range: Target) -> Self {
        self.generate_range = range;
        self
    }

    pub fn with_fork_margin(mut self, margin: usize) -> Self {
        self.fork_margin = margin;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
