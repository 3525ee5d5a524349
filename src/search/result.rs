//! Run statistics

use std::time::Duration;

/// Counters gathered over a solving run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStatistics {
    /// Worker threads in the pool
    pub workers: usize,
    /// Jobs handed to the pool
    pub jobs: u64,
    /// Complete expressions tested against a target
    pub expressions_tested: u64,
    /// Solutions written
    pub solutions_found: u64,
    /// Subtrees handed from a busy worker to an idle one
    pub forks: u64,
    /// Wall-clock time of the run
    pub elapsed_time: Duration,
}

impl SearchStatistics {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    /// Expressions tested per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.expressions_tested as f64 / secs
        }
    }

    /// Average forks per job
    pub fn forks_per_job(&self) -> f64 {
        if self.jobs == 0 {
            0.0
        } else {
            self.forks as f64 / self.jobs as f64
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Workers: {}\n", self.workers));
        s.push_str(&format!("Jobs: {}\n", self.jobs));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!(
            "Expressions tested: {}\n",
            self.expressions_tested
        ));
        s.push_str(&format!(
            "Throughput: {:.0} expressions/sec\n",
            self.throughput()
        ));
        s.push_str(&format!("Solutions found: {}\n", self.solutions_found));

        if self.forks > 0 {
            s.push_str(&format!(
                "Forks: {} ({:.2} per job)\n",
                self.forks,
                self.forks_per_job()
            ));
        }

        s
    }
}
