//! Canonical recursive search
//!
//! The search grows a [`WorkerState`] one action at a time: either place an
//! unused source number, or merge the two topmost outstanding values with an
//! operator that passes the [`rules`](crate::search::rules). Every state whose
//! record holds exactly one expression is tested against the job's target.
//! Each postfix token sequence is reached by exactly one path, so every
//! solution is reported once.

use crate::expr::{Op, PrintStyle, SolutionLine};
use crate::search::job::{Job, WorkerState};
use crate::search::rules::{self, Operand};

/// Callbacks from the search into whoever is driving it
pub trait SearchContext {
    /// Called for every state whose single expression lies within the target
    fn solution(&mut self, job: &Job, state: &WorkerState);

    /// Called after a number has been placed. Returning true hands the subtree
    /// below `state` to someone else and the search moves on to the next
    /// sibling.
    fn offer(&mut self, _job: &Job, _state: &WorkerState) -> bool {
        false
    }

    /// Called for every complete expression tested, matching or not
    fn tested(&mut self) {}
}

/// Search every extension of `state`, starting with `state` itself
pub fn resume<C: SearchContext>(job: &Job, state: &mut WorkerState, ctx: &mut C) {
    test_solution(job, state, ctx);
    combine(job, state, ctx);
    place_number(job, state, ctx);
}

/// Search a job from scratch
#[allow(dead_code)]
pub fn search<C: SearchContext>(job: &Job, ctx: &mut C) {
    let mut state = WorkerState::for_job(job);
    resume(job, &mut state, ctx);
}

fn test_solution<C: SearchContext>(job: &Job, state: &WorkerState, ctx: &mut C) {
    if let Some(value) = state.record.value() {
        ctx.tested();
        if job.target().contains(value) {
            ctx.solution(job, state);
        }
    }
}

fn place_number<C: SearchContext>(job: &Job, state: &mut WorkerState, ctx: &mut C) {
    for (index, &number) in job.numbers().iter().enumerate() {
        if state.used.contains(index) || job.is_shadowed(state.used, index) {
            continue;
        }

        state.used.insert(index);
        state.record.push_value(number);

        if !ctx.offer(job, state) {
            resume(job, state, ctx);
        }

        state.record.pop_value();
        state.used.remove(index);
    }
}

fn combine<C: SearchContext>(job: &Job, state: &mut WorkerState, ctx: &mut C) {
    let Some((lhs, rhs)) = state.record.top_pair() else {
        return;
    };
    if lhs.value < rhs.value {
        return;
    }

    let arity = state.record.arity();
    let left = Operand::at(&state.record, state.record.end_of(arity - 2));
    let right = Operand::at(&state.record, state.record.end_of(arity - 1));

    for op in Op::BINARY {
        let Some(value) = rules::apply(op, &left, &right) else {
            continue;
        };
        if state.record.merge(op, value).is_none() {
            return;
        }
        resume(job, state, ctx);
        state.record.unmerge(lhs, rhs);
    }
}

/// Context that renders every solution into a list, for sequential callers
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct Collector {
    pub style: PrintStyle,
    pub solutions: Vec<String>,
    pub tested: u64,
}

#[allow(dead_code)]
impl Collector {
    pub fn new(style: PrintStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }
}

impl SearchContext for Collector {
    fn solution(&mut self, job: &Job, state: &WorkerState) {
        let line = SolutionLine::new(
            state.record.ops(),
            self.style,
            job.target().is_range(),
        );
        self.solutions.push(line.to_string());
    }

    fn tested(&mut self) {
        self.tested += 1;
    }
}

/// Solve `job` on the calling thread and return the rendered solutions
#[allow(dead_code)]
pub fn collect_solutions(job: &Job, style: PrintStyle) -> Vec<String> {
    let mut collector = Collector::new(style);
    search(job, &mut collector);
    collector.solutions
}
