//! Worker pool for solving jobs on several threads.
//!
//! # Architecture
//!
//! - A **scheduler** owns a fixed array of worker threads and the pool lock.
//! - Each **worker** waits on its own wake channel, searches whatever was
//!   installed into its slot, then marks itself idle.
//! - While solving a single job, a worker that has just placed a number may
//!   **fork**: the subtree below that number is copied into an idle worker,
//!   and the forking worker moves on to the next sibling number.
//!
//! # Example
//!
//! ```ignore
//! let config = ParallelConfig::default().with_workers(4);
//! let printer = Arc::new(SolutionPrinter::stdout(PrintStyle::Expr));
//! let scheduler = Scheduler::new(&config, printer)?;
//! scheduler.solve(Job::new(target, numbers)?);
//! let stats = scheduler.shutdown()?;
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod worker;

pub use config::ParallelConfig;
pub use coordinator::Scheduler;
