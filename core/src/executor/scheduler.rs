use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Semaphore;

use crate::error::PipelineError;

use super::progress::ProgressMonitor;
use super::traits::Compiler;
use super::types::{BuildTask, TaskAttempt};

/// Run one round of tasks through the compiler with bounded concurrency.
///
/// Attempts are collected in completion order, not submission order; the
/// report aggregates by task identity so this is safe. Tasks never wait on
/// each other, only on a pool permit and their own subprocess.
pub async fn run_round(
    tasks: &[BuildTask],
    compiler: Arc<dyn Compiler>,
    max_workers: usize,
    round: u32,
    progress: Arc<Mutex<ProgressMonitor>>,
) -> Result<Vec<TaskAttempt>, PipelineError> {
    let sem = Arc::new(Semaphore::new(max_workers.max(1)));
    let mut futs: FuturesUnordered<_> = FuturesUnordered::new();

    for task in tasks {
        let task = task.clone();
        let sem = sem.clone();
        let compiler = compiler.clone();
        let progress = progress.clone();

        futs.push(async move {
            let _permit = sem
                .acquire_owned()
                .await
                .map_err(|_| PipelineError::PoolClosed)?;

            if let Ok(mut monitor) = progress.lock() {
                monitor.add_task(&task.name);
            }

            let started = Instant::now();
            let state = compiler.compile(&task).await;
            let duration = started.elapsed();

            if let Ok(mut monitor) = progress.lock() {
                monitor.complete_task(&task.name, state.is_success(), duration.as_millis() as u64);
            }

            Ok::<TaskAttempt, PipelineError>(TaskAttempt::new(&task, state, duration, round))
        });
    }

    let total = tasks.len();
    let mut attempts = Vec::with_capacity(total);

    while let Some(res) = futs.next().await {
        let attempt = res?;
        let done = attempts.len() + 1;
        let duration = crate::util::format_duration(attempt.duration.as_secs_f64());
        match attempt.state.detail() {
            None => tracing::info!(
                task = %attempt.name,
                round,
                duration = %duration,
                done,
                total,
                "task verified"
            ),
            Some(detail) => tracing::error!(
                task = %attempt.name,
                round,
                duration = %duration,
                done,
                total,
                detail,
                "task failed"
            ),
        }
        attempts.push(attempt);
    }

    Ok(attempts)
}
