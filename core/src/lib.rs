//! doxbuild-core — pipeline logic for the documentation build orchestrator.
//!
//! The pipeline discovers independently buildable documentation units,
//! fans them out to an external HTML-documentation compiler under a
//! bounded worker pool, verifies the structural integrity of what came
//! back, retries failures for a bounded number of rounds, and prunes the
//! generated navigation outlines to a renderable depth.

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod executor;
pub mod invoker;
pub mod nav;
pub mod util;
pub mod verify;

pub use error::{CliError, PipelineError};
pub use executor::{BuildEngine, BuildOpts, BuildTask, ExecutionReport, TaskAttempt, TaskState};
