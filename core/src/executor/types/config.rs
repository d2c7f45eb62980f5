use std::time::Duration;

use crate::config::BuildConfig;

/// Runtime options for one pipeline run, derived from config plus CLI
/// overrides. Plain data; the engine never reads config files itself.
#[derive(Debug, Clone)]
pub struct BuildOpts {
    /// Worker pool width for the parallel compile phase.
    pub max_workers: usize,

    /// Hard timeout for one compiler subprocess.
    pub timeout: Duration,

    /// Retry rounds after the initial attempt.
    pub max_retry_rounds: u32,

    /// Whether `CompileFailed` tasks re-enter the retry loop.
    pub retry_compile_failures: bool,

    /// Depth limit applied to generated navigation documents.
    pub max_nav_depth: usize,

    /// External compiler binary name or path.
    pub compiler_bin: String,

    /// Descriptor file name looked up during the catalog scan.
    pub descriptor_name: String,

    /// Enable the visual progress bar (disabled when stderr is not a tty).
    pub progress_bar: bool,
}

impl BuildOpts {
    pub fn from_config(cfg: &BuildConfig) -> Self {
        Self {
            max_workers: cfg.max_workers.max(1),
            timeout: Duration::from_secs(cfg.timeout_secs),
            max_retry_rounds: cfg.max_retry_rounds,
            retry_compile_failures: cfg.retry_compile_failures,
            max_nav_depth: cfg.max_nav_depth,
            compiler_bin: cfg.compiler_bin.clone(),
            descriptor_name: cfg.descriptor_name.clone(),
            progress_bar: false,
        }
    }
}

impl Default for BuildOpts {
    fn default() -> Self {
        Self::from_config(&BuildConfig::default())
    }
}
