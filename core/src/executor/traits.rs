use async_trait::async_trait;

use super::types::{BuildTask, TaskState};

/// Seam between the scheduling loop and the external compiler so the
/// retry machinery can be exercised without spawning real subprocesses.
#[async_trait]
pub trait Compiler: Send + Sync {
    fn name(&self) -> &str;

    /// Run one attempt at one task and classify the outcome. Must never
    /// return an error for a failing task; failure is a `TaskState`.
    async fn compile(&self, task: &BuildTask) -> TaskState;
}
