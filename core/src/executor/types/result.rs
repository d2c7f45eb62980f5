use std::time::Duration;

use serde::Serialize;

use super::task::BuildTask;

/// Terminal classification of one compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskState {
    /// Zero exit and all expected artifacts present and well-formed.
    Verified,
    /// Zero exit but incomplete or malformed output.
    VerificationFailed { missing: String },
    /// Non-zero exit; `detail` carries the captured stderr tail.
    CompileFailed { detail: String },
    /// Subprocess exceeded the hard timeout and was killed.
    TimedOut,
}

impl TaskState {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskState::Verified)
    }

    /// Short diagnostic used in log lines and the report.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TaskState::Verified => None,
            TaskState::VerificationFailed { missing } => Some(missing),
            TaskState::CompileFailed { detail } => Some(detail),
            TaskState::TimedOut => Some("timed out"),
        }
    }
}

/// Outcome of one attempt at one task. Retries append new attempts; an
/// attempt is never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct TaskAttempt {
    pub name: String,
    #[serde(flatten)]
    pub state: TaskState,
    #[serde(serialize_with = "serialize_secs", rename = "duration_secs")]
    pub duration: Duration,
    /// 0 for the initial attempt, 1..N for retries.
    pub round: u32,
}

impl TaskAttempt {
    pub fn new(task: &BuildTask, state: TaskState, duration: Duration, round: u32) -> Self {
        Self {
            name: task.name.clone(),
            state,
            duration,
            round,
        }
    }
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Per-round slice of the aggregate report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundStats {
    pub round: u32,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Aggregate of all attempts across all rounds. Assembled once at the end
/// of a run and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Distinct tasks processed.
    pub total: usize,
    /// Tasks whose final state is `Verified`.
    pub succeeded: usize,
    /// Tasks still failing after the last round.
    pub failed: usize,
    #[serde(serialize_with = "serialize_secs", rename = "duration_secs")]
    pub duration: Duration,
    pub rounds: Vec<RoundStats>,
    pub attempts: Vec<TaskAttempt>,
}

impl ExecutionReport {
    pub fn assemble(attempts: Vec<TaskAttempt>, duration: Duration) -> Self {
        let mut rounds: Vec<RoundStats> = Vec::new();
        // The report is keyed by task identity: the attempt from the
        // highest round a task appeared in decides its final state.
        let mut final_state: std::collections::BTreeMap<&str, &TaskAttempt> =
            std::collections::BTreeMap::new();

        for attempt in &attempts {
            let round = attempt.round as usize;
            if rounds.len() <= round {
                rounds.resize_with(round + 1, RoundStats::default);
            }
            let stats = &mut rounds[round];
            stats.round = attempt.round;
            stats.attempted += 1;
            if attempt.state.is_success() {
                stats.succeeded += 1;
            } else {
                stats.failed += 1;
            }

            match final_state.get(attempt.name.as_str()) {
                Some(existing) if existing.round >= attempt.round => {}
                _ => {
                    final_state.insert(&attempt.name, attempt);
                }
            }
        }

        let total = final_state.len();
        let succeeded = final_state
            .values()
            .filter(|a| a.state.is_success())
            .count();

        Self {
            generated_at: chrono::Utc::now(),
            total,
            succeeded,
            failed: total - succeeded,
            duration,
            rounds,
            attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Names of tasks whose final state is not `Verified`, sorted.
    pub fn failing_tasks(&self) -> Vec<&str> {
        let mut last: std::collections::BTreeMap<&str, &TaskAttempt> =
            std::collections::BTreeMap::new();
        for attempt in &self.attempts {
            match last.get(attempt.name.as_str()) {
                Some(existing) if existing.round >= attempt.round => {}
                _ => {
                    last.insert(&attempt.name, attempt);
                }
            }
        }
        last.values()
            .filter(|a| !a.state.is_success())
            .map(|a| a.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn task(name: &str) -> BuildTask {
        BuildTask::new(
            name,
            PathBuf::from(format!("/d/{name}/Doxyfile")),
            PathBuf::from(format!("/o/{name}")),
        )
    }

    fn attempt(name: &str, state: TaskState, round: u32) -> TaskAttempt {
        TaskAttempt::new(&task(name), state, Duration::from_secs(1), round)
    }

    #[test]
    fn final_state_comes_from_last_round() {
        let attempts = vec![
            attempt("grp/a", TaskState::Verified, 0),
            attempt(
                "grp/b",
                TaskState::VerificationFailed {
                    missing: "index.html".into(),
                },
                0,
            ),
            attempt("grp/b", TaskState::Verified, 1),
        ];
        let report = ExecutionReport::assemble(attempts, Duration::from_secs(3));
        assert_eq!(report.total, 2);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 0);
        assert!(report.is_success());
        assert_eq!(report.rounds.len(), 2);
        assert_eq!(report.rounds[0].attempted, 2);
        assert_eq!(report.rounds[1].attempted, 1);
    }

    #[test]
    fn persistent_failure_is_counted_once() {
        let attempts = vec![
            attempt("grp/c", TaskState::TimedOut, 0),
            attempt("grp/c", TaskState::TimedOut, 1),
            attempt("grp/c", TaskState::TimedOut, 2),
        ];
        let report = ExecutionReport::assemble(attempts, Duration::from_secs(9));
        assert_eq!(report.total, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failing_tasks(), vec!["grp/c"]);
        assert_eq!(report.rounds.len(), 3);
        for stats in &report.rounds {
            assert_eq!(stats.attempted, 1);
            assert_eq!(stats.failed, 1);
        }
    }

    #[test]
    fn report_serializes_to_json() {
        let report = ExecutionReport::assemble(
            vec![attempt("grp/a", TaskState::Verified, 0)],
            Duration::from_millis(1500),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["attempts"][0]["state"], "verified");
        assert_eq!(json["duration_secs"], 1.5);
    }
}
