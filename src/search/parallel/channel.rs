//! Shared pool state and wake channels for the worker pool.
//!
//! Three things are shared between the scheduler and its workers:
//! - the pool lock, guarding the idle count and per-worker running flags,
//!   with a condition variable signalled whenever a worker turns idle;
//! - one slot per worker holding its installed job and search state, locked
//!   by the worker while it searches and by a claimer while it installs;
//! - one bounded wake channel per worker.
//!
//! Only a claimer holding the pool lock moves a worker from idle to running,
//! and only the worker itself moves back. A slot is written by someone other
//! than its worker only between those two transitions.

use crate::error::fatal;
use crate::output::SolutionPrinter;
use crate::search::job::{Job, WorkerState};
use crate::search::parallel::config::ParallelConfig;
use crate::search::result::SearchStatistics;
use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

/// Message sent to a waiting worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Search from the state installed in the worker's slot.
    Run,
    /// Leave the worker loop.
    Shutdown,
}

/// Idle bookkeeping guarded by the pool lock.
#[derive(Debug)]
pub struct PoolState {
    pub idle: usize,
    pub running: Vec<bool>,
}

impl PoolState {
    fn new(num_workers: usize) -> Self {
        Self {
            idle: num_workers,
            running: vec![false; num_workers],
        }
    }

    pub fn all_idle(&self) -> bool {
        self.idle == self.running.len()
    }

    /// Mark the first idle worker running and return its id
    fn claim(&mut self) -> Option<usize> {
        let id = self.running.iter().position(|running| !running)?;
        self.running[id] = true;
        self.idle -= 1;
        Some(id)
    }
}

/// Work installed into a worker before it is woken.
#[derive(Debug, Default)]
pub struct Slot {
    pub job: Option<Arc<Job>>,
    pub state: WorkerState,
    /// Installed by a fork rather than as a fresh job
    pub forked: bool,
    /// The run may hand subtrees to idle workers
    pub allow_fork: bool,
}

/// State shared by the scheduler and every worker.
pub struct Shared {
    pool: Mutex<PoolState>,
    became_idle: Condvar,
    /// Lock-free copy of `PoolState::idle` for the fork fast path.
    idle_hint: AtomicUsize,
    slots: Vec<Mutex<Slot>>,
    wakers: Vec<Sender<Signal>>,
    pub printer: Arc<SolutionPrinter>,
    pub config: ParallelConfig,
    jobs: AtomicU64,
    expressions_tested: AtomicU64,
    solutions_found: AtomicU64,
    forks: AtomicU64,
}

impl Shared {
    /// Create the shared state and the receiving end of every wake channel.
    pub fn new(
        config: ParallelConfig,
        printer: Arc<SolutionPrinter>,
    ) -> (Arc<Self>, Vec<Receiver<Signal>>) {
        let num_workers = config.num_workers;
        let mut wakers = Vec::with_capacity(num_workers);
        let mut receivers = Vec::with_capacity(num_workers);

        for _ in 0..num_workers {
            // A claimed worker is woken exactly once per claim
            let (tx, rx) = bounded(1);
            wakers.push(tx);
            receivers.push(rx);
        }

        let shared = Self {
            pool: Mutex::new(PoolState::new(num_workers)),
            became_idle: Condvar::new(),
            idle_hint: AtomicUsize::new(num_workers),
            slots: (0..num_workers).map(|_| Mutex::default()).collect(),
            wakers,
            printer,
            config,
            jobs: AtomicU64::new(0),
            expressions_tested: AtomicU64::new(0),
            solutions_found: AtomicU64::new(0),
            forks: AtomicU64::new(0),
        };

        (Arc::new(shared), receivers)
    }

    pub fn num_workers(&self) -> usize {
        self.slots.len()
    }

    pub fn lock_pool(&self) -> MutexGuard<'_, PoolState> {
        self.pool
            .lock()
            .unwrap_or_else(|_| fatal("worker pool lock poisoned"))
    }

    pub fn lock_slot(&self, id: usize) -> MutexGuard<'_, Slot> {
        self.slots[id]
            .lock()
            .unwrap_or_else(|_| fatal(format!("slot of worker {} poisoned", id)))
    }

    /// Block until `ready` holds for the pool state, then return the guard.
    pub fn wait_until<F>(&self, mut ready: F) -> MutexGuard<'_, PoolState>
    where
        F: FnMut(&PoolState) -> bool,
    {
        let mut pool = self.lock_pool();
        while !ready(&*pool) {
            pool = self
                .became_idle
                .wait(pool)
                .unwrap_or_else(|_| fatal("worker pool lock poisoned"));
        }
        pool
    }

    /// Claim an idle worker under an already held pool lock.
    pub fn claim_locked(&self, pool: &mut PoolState) -> Option<usize> {
        let id = pool.claim()?;
        self.idle_hint.store(pool.idle, Ordering::Release);
        Some(id)
    }

    /// Called by a worker once its search is exhausted.
    pub fn mark_idle(&self, id: usize) {
        let mut pool = self.lock_pool();
        pool.running[id] = false;
        pool.idle += 1;
        self.idle_hint.store(pool.idle, Ordering::Release);
        drop(pool);
        self.became_idle.notify_all();
    }

    /// Install a fresh job into a claimed worker and wake it.
    pub fn install_job(&self, id: usize, job: Arc<Job>, allow_fork: bool) {
        {
            let mut slot = self.lock_slot(id);
            slot.state.reset(&job);
            slot.job = Some(job);
            slot.forked = false;
            slot.allow_fork = allow_fork;
        }
        self.wake(id, Signal::Run);
    }

    /// Copy a running worker's state into a claimed worker and wake it.
    fn install_fork(&self, id: usize, job: Arc<Job>, state: &WorkerState) {
        {
            let mut slot = self.lock_slot(id);
            slot.state.copy_from(state);
            slot.job = Some(job);
            slot.forked = true;
            slot.allow_fork = true;
        }
        self.wake(id, Signal::Run);
    }

    /// Hand the subtree below `state` to an idle worker, if there is one.
    ///
    /// Returns false without blocking when every worker is busy.
    pub fn try_fork(&self, job: &Arc<Job>, state: &WorkerState) -> bool {
        if self.idle_hint.load(Ordering::Acquire) == 0 {
            return false;
        }

        let claimed = {
            let mut pool = self.lock_pool();
            self.claim_locked(&mut pool)
        };
        let Some(id) = claimed else {
            return false;
        };

        self.install_fork(id, Arc::clone(job), state);
        self.forks.fetch_add(1, Ordering::Relaxed);
        true
    }

    pub fn wake(&self, id: usize, signal: Signal) {
        if self.wakers[id].send(signal).is_err() {
            fatal(format!("worker {} is gone", id));
        }
    }

    pub fn record_job(&self) {
        self.jobs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_search(&self, tested: u64, solutions: u64) {
        self.expressions_tested.fetch_add(tested, Ordering::Relaxed);
        self.solutions_found.fetch_add(solutions, Ordering::Relaxed);
    }

    /// Counters accumulated so far; the caller fills in elapsed time
    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            workers: self.num_workers(),
            jobs: self.jobs.load(Ordering::Relaxed),
            expressions_tested: self.expressions_tested.load(Ordering::Relaxed),
            solutions_found: self.solutions_found.load(Ordering::Relaxed),
            forks: self.forks.load(Ordering::Relaxed),
            ..Default::default()
        }
    }
}
