//! Subprocess-backed compiler invocation.
//!
//! One invocation: clean the task's output directory contents, spawn the
//! external compiler with the descriptor path as its sole argument, wait
//! under a hard timeout, classify by exit code, then verify the output
//! tree. Each task owns a disjoint output subtree, so invocations share no
//! mutable state.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::executor::traits::Compiler;
use crate::executor::types::{BuildTask, TaskState};
use crate::verify;

/// Bytes of stderr kept as the diagnostic for a failed compile.
const STDERR_TAIL_BYTES: usize = 4096;

pub struct ProcessCompiler {
    bin: String,
    timeout: Duration,
}

impl ProcessCompiler {
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            timeout,
        }
    }

    /// Delete the *contents* of the task's output directory, keeping the
    /// directory itself, so the compiler always starts from a clean tree.
    /// Entries that cannot be removed are skipped, not fatal.
    fn clean_output_dir(&self, task: &BuildTask) {
        let entries = match std::fs::read_dir(&task.output_dir) {
            Ok(entries) => entries,
            // Not existing yet is fine; the compiler creates it.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                tracing::warn!(task = %task.name, error = %e, "cannot read output dir for cleanup");
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let removed = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
            if let Err(e) = removed {
                tracing::warn!(task = %task.name, entry = %path.display(), error = %e, "stale entry not removed, continuing");
            }
        }
    }

    async fn run_compiler(&self, task: &BuildTask) -> TaskState {
        let child = match Command::new(&self.bin)
            .arg(&task.descriptor_path)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return TaskState::CompileFailed {
                    detail: format!("spawn {} failed: {e}", self.bin),
                };
            }
        };

        let waited = tokio::time::timeout(self.timeout, child.wait_with_output()).await;

        let output = match waited {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return TaskState::CompileFailed {
                    detail: format!("wait failed: {e}"),
                };
            }
            Err(_) => {
                // kill_on_drop reaps the child once the future is dropped.
                tracing::warn!(task = %task.name, timeout_secs = self.timeout.as_secs(), "compiler timed out, killing");
                return TaskState::TimedOut;
            }
        };

        if !output.status.success() {
            return TaskState::CompileFailed {
                detail: stderr_tail(&output.stderr),
            };
        }

        match verify::verify_output(task) {
            Ok(()) => TaskState::Verified,
            Err(failure) => TaskState::VerificationFailed {
                missing: failure.missing,
            },
        }
    }
}

#[async_trait]
impl Compiler for ProcessCompiler {
    fn name(&self) -> &str {
        &self.bin
    }

    async fn compile(&self, task: &BuildTask) -> TaskState {
        self.clean_output_dir(task);
        self.run_compiler(task).await
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "non-zero exit with no diagnostics".to_string();
    }
    let tail_start = trimmed.len().saturating_sub(STDERR_TAIL_BYTES);
    let mut start = tail_start;
    while start < trimmed.len() && !trimmed.is_char_boundary(start) {
        start += 1;
    }
    trimmed[start..].to_string()
}

/// Pre-create every task's output directory (and parents) before the
/// parallel phase so cleanup and verification have a stable root to work
/// against. Creation failures are warnings; the invocation itself will
/// surface the real problem.
pub fn precreate_output_dirs(tasks: &[BuildTask]) {
    let mut created = 0usize;
    for task in tasks {
        match std::fs::create_dir_all(&task.output_dir) {
            Ok(()) => created += 1,
            Err(e) => {
                tracing::warn!(task = %task.name, dir = %task.output_dir.display(), error = %e, "output dir not created");
            }
        }
    }
    tracing::debug!(created, total = tasks.len(), "output directories prepared");
}
