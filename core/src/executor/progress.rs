use std::collections::HashMap;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Visual progress monitor for one round of compiler invocations.
pub struct ProgressMonitor {
    multi: MultiProgress,
    overall: ProgressBar,
    task_bars: HashMap<String, ProgressBar>,
    enabled: bool,
}

impl ProgressMonitor {
    /// `enabled` should be false when stderr is not a terminal.
    pub fn new(total_tasks: usize, enabled: bool) -> Self {
        if !enabled {
            return Self {
                multi: MultiProgress::new(),
                overall: ProgressBar::hidden(),
                task_bars: HashMap::new(),
                enabled: false,
            };
        }

        let multi = MultiProgress::new();
        let overall = multi.add(ProgressBar::new(total_tasks as u64));

        overall.set_style(
            ProgressStyle::default_bar()
                .template(
                    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tasks ({percent}%) {msg}",
                )
                .unwrap()
                .progress_chars("█▓▒░  "),
        );

        Self {
            multi,
            overall,
            task_bars: HashMap::new(),
            enabled: true,
        }
    }

    pub fn add_task(&mut self, name: &str) {
        if !self.enabled {
            return;
        }

        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.green} {msg}")
                .unwrap(),
        );
        bar.set_message(name.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        self.task_bars.insert(name.to_string(), bar);
    }

    pub fn complete_task(&mut self, name: &str, success: bool, duration_ms: u64) {
        if !self.enabled {
            return;
        }

        if let Some(bar) = self.task_bars.remove(name) {
            let icon = if success { "ok" } else { "FAILED" };
            bar.finish_with_message(format!("{name}: {icon} ({duration_ms}ms)"));
        }

        self.overall.inc(1);
    }

    pub fn set_round(&self, round: u32, failing: usize) {
        if self.enabled {
            self.overall
                .set_message(format!("retry round {round} ({failing} tasks)"));
        }
    }

    pub fn finish(&self, success: bool) {
        if !self.enabled {
            return;
        }

        let msg = if success {
            "all tasks verified"
        } else {
            "some tasks failed"
        };
        self.overall.finish_with_message(msg.to_string());
    }
}

impl Drop for ProgressMonitor {
    fn drop(&mut self) {
        for (_, bar) in self.task_bars.drain() {
            bar.finish_and_clear();
        }
    }
}
