//! Configuration for the worker pool.

/// Workers only offer subtrees while at least this many numbers remain
/// unplaced. Smaller subtrees are cheaper to search than to hand over.
pub const DEFAULT_FORK_MARGIN: usize = 3;

/// Configuration for the worker pool.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads to spawn.
    pub num_workers: usize,
    /// A worker forks after placing a number only if
    /// `placed + fork_margin < count`.
    pub fork_margin: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            fork_margin: DEFAULT_FORK_MARGIN,
        }
    }
}

impl ParallelConfig {
    /// Create a new parallel config with the specified number of workers.
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    pub fn with_fork_margin(mut self, fork_margin: usize) -> Self {
        self.fork_margin = fork_margin;
        self
    }

    /// True when a worker that has placed `placed` of `count` numbers may
    /// hand its subtree to an idle worker.
    pub fn may_fork(&self, placed: usize, count: usize) -> bool {
        placed.saturating_add(self.fork_margin) < count
    }
}
