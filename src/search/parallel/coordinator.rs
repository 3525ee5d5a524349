//! Scheduler that owns the worker threads and hands them jobs.

use crate::error::{NumbersError, Result};
use crate::output::SolutionPrinter;
use crate::search::job::Job;
use crate::search::parallel::channel::{PoolState, Shared, Signal};
use crate::search::parallel::config::ParallelConfig;
use crate::search::parallel::worker::run_worker;
use crate::search::result::SearchStatistics;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Fixed pool of worker threads.
///
/// [`solve`](Scheduler::solve) fans one job out across the pool by forking;
/// [`submit`](Scheduler::submit) streams independent jobs, one worker each.
pub struct Scheduler {
    shared: Arc<Shared>,
    handles: Vec<JoinHandle<()>>,
    start_time: Instant,
}

impl Scheduler {
    /// Spawn `config.num_workers` idle workers.
    pub fn new(config: &ParallelConfig, printer: Arc<SolutionPrinter>) -> Result<Self> {
        let num_workers = config.num_workers;
        if num_workers == 0 {
            return Err(NumbersError::NoThreads);
        }

        let (shared, receivers) = Shared::new(config.clone(), printer);

        let mut scheduler = Self {
            shared,
            handles: Vec::with_capacity(num_workers),
            start_time: Instant::now(),
        };

        for (id, wake) in receivers.into_iter().enumerate() {
            let shared = Arc::clone(&scheduler.shared);
            let handle = thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || run_worker(id, shared, wake))
                .map_err(|source| NumbersError::Spawn { id, source })?;
            scheduler.handles.push(handle);
        }

        tracing::debug!(
            workers = num_workers,
            fork_margin = config.fork_margin,
            "worker pool started"
        );
        Ok(scheduler)
    }

    /// Solve one job across the whole pool, returning once every worker is
    /// idle again.
    pub fn solve(&self, job: Job) {
        let job = Arc::new(job);
        tracing::debug!(target_range = %job.target(), numbers = job.len(), "solving");

        let id = {
            let mut pool = self.shared.wait_until(|pool| pool.idle > 0);
            self.shared.claim_locked(&mut pool)
        };
        if let Some(id) = id {
            self.shared.record_job();
            self.shared.install_job(id, job, true);
        }

        self.drain();
    }

    /// Hand a job to the next idle worker, waiting for one if all are busy.
    /// The job is searched without forking.
    pub fn submit(&self, job: Job) {
        let job = Arc::new(job);

        let id = {
            let mut pool = self.shared.wait_until(|pool| pool.idle > 0);
            self.shared.claim_locked(&mut pool)
        };
        if let Some(id) = id {
            tracing::trace!(worker = id, numbers = ?job.numbers(), "submitted");
            self.shared.record_job();
            self.shared.install_job(id, job, false);
        }
    }

    /// Wait until every worker is idle.
    pub fn drain(&self) {
        drop(self.shared.wait_until(PoolState::all_idle));
    }

    /// Counters accumulated since the pool started
    pub fn statistics(&self) -> SearchStatistics {
        let mut stats = self.shared.statistics();
        stats.elapsed_time = self.start_time.elapsed();
        stats
    }

    /// Drain the pool, stop every worker and flush the output.
    pub fn shutdown(mut self) -> Result<SearchStatistics> {
        self.stop_workers()?;
        self.shared.printer.flush()?;
        let stats = self.statistics();
        tracing::debug!(
            jobs = stats.jobs,
            solutions = stats.solutions_found,
            forks = stats.forks,
            "worker pool stopped"
        );
        Ok(stats)
    }

    fn stop_workers(&mut self) -> Result<()> {
        if self.handles.is_empty() {
            return Ok(());
        }

        self.drain();
        for id in 0..self.handles.len() {
            self.shared.wake(id, Signal::Shutdown);
        }

        let mut result = Ok(());
        for (id, handle) in self.handles.drain(..).enumerate() {
            if handle.join().is_err() && result.is_ok() {
                result = Err(NumbersError::WorkerPanicked(id));
            }
        }
        result
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Err(e) = self.stop_workers() {
            tracing::error!("failed to stop worker pool: {}", e);
        }
        if let Err(e) = self.shared.printer.flush() {
            tracing::error!("failed to flush solutions: {}", e);
        }
    }
}
