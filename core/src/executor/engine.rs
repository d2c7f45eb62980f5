use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::catalog;
use crate::error::PipelineError;
use crate::invoker::{precreate_output_dirs, ProcessCompiler};
use crate::nav;

use super::progress::ProgressMonitor;
use super::scheduler::run_round;
use super::traits::Compiler;
use super::types::{BuildOpts, BuildTask, ExecutionReport, TaskAttempt, TaskState};

/// Drives the whole pipeline: catalog scan, parallel compile fan-out,
/// verification-gated retry rounds, report assembly.
pub struct BuildEngine {
    opts: BuildOpts,
    compiler: Arc<dyn Compiler>,
}

impl BuildEngine {
    /// Engine backed by the real subprocess compiler.
    pub fn new(opts: BuildOpts) -> Self {
        let compiler = Arc::new(ProcessCompiler::new(
            opts.compiler_bin.clone(),
            opts.timeout,
        ));
        Self { opts, compiler }
    }

    /// Engine with an injected compiler; used by tests and embedders.
    pub fn with_compiler(opts: BuildOpts, compiler: Arc<dyn Compiler>) -> Self {
        Self { opts, compiler }
    }

    /// Run the pipeline over every task discovered under `root`.
    ///
    /// Task failures end up in the report, never in `Err`; errors are
    /// reserved for infrastructure faults.
    pub async fn run(&self, root: &Path) -> Result<ExecutionReport, PipelineError> {
        let tasks = catalog::scan_catalog(root, &self.opts.descriptor_name);
        if tasks.is_empty() {
            tracing::warn!(root = %root.display(), "no build descriptors found");
            return Ok(ExecutionReport::assemble(Vec::new(), Instant::now().elapsed()));
        }

        precreate_output_dirs(&tasks);
        let report = self.run_tasks(tasks).await?;

        tracing::info!(
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            rounds = report.rounds.len(),
            duration = %crate::util::format_duration(report.duration.as_secs_f64()),
            "build run complete"
        );
        Ok(report)
    }

    /// Compile an explicit task list through the bounded pool and the
    /// retry loop.
    pub async fn run_tasks(
        &self,
        tasks: Vec<BuildTask>,
    ) -> Result<ExecutionReport, PipelineError> {
        let started = Instant::now();
        let progress = Arc::new(Mutex::new(ProgressMonitor::new(
            tasks.len(),
            self.opts.progress_bar,
        )));

        let mut attempts: Vec<TaskAttempt> = Vec::new();
        let mut pending: Vec<BuildTask> = tasks;

        for round in 0..=self.opts.max_retry_rounds {
            if pending.is_empty() {
                break;
            }
            if round > 0 {
                tracing::info!(round, failing = pending.len(), "retrying failed tasks");
                if let Ok(monitor) = progress.lock() {
                    monitor.set_round(round, pending.len());
                }
            }

            let round_attempts = run_round(
                &pending,
                self.compiler.clone(),
                self.opts.max_workers,
                round,
                progress.clone(),
            )
            .await?;

            self.prune_navigation(&pending, &round_attempts);

            let retry: HashSet<String> = round_attempts
                .iter()
                .filter(|a| self.is_retryable(&a.state))
                .map(|a| a.name.clone())
                .collect();

            attempts.extend(round_attempts);
            pending.retain(|t| retry.contains(&t.name));
        }

        let report = ExecutionReport::assemble(attempts, started.elapsed());
        if let Ok(monitor) = progress.lock() {
            monitor.finish(report.is_success());
        }
        Ok(report)
    }

    /// Depth-limit each verified task's navigation file so the aggregate
    /// outline stays renderable downstream. Runs after the round, outside
    /// the retry decision: pruning never changes a task's state.
    fn prune_navigation(&self, tasks: &[BuildTask], attempts: &[TaskAttempt]) {
        for attempt in attempts {
            if !attempt.state.is_success() {
                continue;
            }
            let Some(task) = tasks.iter().find(|t| t.name == attempt.name) else {
                continue;
            };
            let nav_path = task.html_dir().join(crate::verify::NAV_FILE);
            if !nav_path.is_file() {
                continue;
            }
            match nav::limit_file(&nav_path, self.opts.max_nav_depth) {
                Ok(true) => {
                    tracing::debug!(task = %task.name, max_depth = self.opts.max_nav_depth, "navigation depth-limited");
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(task = %task.name, error = %e, "navigation pruning skipped");
                }
            }
        }
    }

    fn is_retryable(&self, state: &TaskState) -> bool {
        match state {
            TaskState::Verified => false,
            TaskState::VerificationFailed { .. } | TaskState::TimedOut => true,
            TaskState::CompileFailed { .. } => self.opts.retry_compile_failures,
        }
    }
}
