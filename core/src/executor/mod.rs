//! Parallel build execution.
//!
//! ```text
//! scan_catalog()            -> Vec<BuildTask>
//!   ↓
//! BuildEngine::run_tasks()  -> round 0 over all tasks
//!   ↓                          (Semaphore-bounded fan-out, FuturesUnordered)
//! retry rounds 1..=N over still-failing tasks
//!   ↓
//! ExecutionReport::assemble()
//! ```
//!
//! Tasks are independent: disjoint output directories, no cross-task
//! synchronization beyond the pool's permit queue. Results arrive in
//! completion order and the report aggregates by task identity.

mod engine;
mod progress;
mod scheduler;
pub mod traits;
pub mod types;

pub use engine::BuildEngine;
pub use progress::ProgressMonitor;
pub use scheduler::run_round;
pub use types::{BuildOpts, BuildTask, ExecutionReport, RoundStats, TaskAttempt, TaskState};
