//! Worker thread loop.

use crate::error::fatal;
use crate::expr::{SolutionLine, evaluate};
use crate::search::engine::{self, SearchContext};
use crate::search::job::{Job, WorkerState};
use crate::search::parallel::channel::{Shared, Signal};
use crossbeam_channel::Receiver;
use std::fmt::Write;
use std::sync::Arc;

/// Search context of one worker for the duration of one installed run.
pub struct WorkerContext<'a> {
    id: usize,
    shared: &'a Shared,
    job: Arc<Job>,
    /// Forking allowed; off for streamed jobs
    forking: bool,
    line: String,
    tested: u64,
    solutions: u64,
}

impl<'a> WorkerContext<'a> {
    pub fn new(id: usize, shared: &'a Shared, job: Arc<Job>, forking: bool) -> Self {
        Self {
            id,
            shared,
            job,
            forking,
            line: String::new(),
            tested: 0,
            solutions: 0,
        }
    }
}

impl SearchContext for WorkerContext<'_> {
    fn solution(&mut self, job: &Job, state: &WorkerState) {
        let ops = state.record.ops();
        debug_assert!(evaluate(ops).is_some_and(|value| job.target().contains(value)));

        let printer = &self.shared.printer;
        let line = SolutionLine::new(ops, printer.style(), job.target().is_range());

        self.line.clear();
        if write!(self.line, "{}", line).is_err() {
            fatal(format!("worker {} could not render a solution", self.id));
        }
        if let Err(e) = printer.emit(&self.line) {
            fatal(format!("worker {} could not write a solution: {}", self.id, e));
        }
        self.solutions += 1;
    }

    fn offer(&mut self, job: &Job, state: &WorkerState) -> bool {
        self.forking
            && self.shared.config.may_fork(state.placed(), job.len())
            && self.shared.try_fork(&self.job, state)
    }

    fn tested(&mut self) {
        self.tested += 1;
    }
}

/// Run worker `id` until it receives [`Signal::Shutdown`].
pub fn run_worker(id: usize, shared: Arc<Shared>, wake: Receiver<Signal>) {
    tracing::trace!(worker = id, "worker started");

    loop {
        match wake.recv() {
            Ok(Signal::Run) => {}
            Ok(Signal::Shutdown) => break,
            Err(_) => fatal(format!("wake channel of worker {} closed", id)),
        }

        {
            let mut guard = shared.lock_slot(id);
            let slot = &mut *guard;
            let Some(job) = slot.job.take() else {
                fatal(format!("worker {} woken without a job", id));
            };

            tracing::trace!(
                worker = id,
                forked = slot.forked,
                placed = slot.state.placed(),
                "running"
            );

            let mut ctx = WorkerContext::new(id, &shared, Arc::clone(&job), slot.allow_fork);
            engine::resume(&job, &mut slot.state, &mut ctx);
            shared.record_search(ctx.tested, ctx.solutions);
        }

        shared.mark_idle(id);
    }

    tracing::trace!(worker = id, "worker stopped");
}
