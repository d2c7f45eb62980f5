use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Fixed width of the worker pool for parallel compiler invocations.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Hard per-task timeout for one compiler subprocess, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry rounds after the initial attempt before a task is terminal.
    #[serde(default = "default_max_retry_rounds")]
    pub max_retry_rounds: u32,

    /// Whether a non-zero compiler exit is re-attempted like a
    /// verification failure or timeout.
    #[serde(default = "default_retry_compile_failures")]
    pub retry_compile_failures: bool,

    /// Maximum nesting level kept when pruning navigation documents.
    #[serde(default = "default_max_nav_depth")]
    pub max_nav_depth: usize,

    /// External documentation compiler binary.
    #[serde(default = "default_compiler_bin")]
    pub compiler_bin: String,

    /// Descriptor file name looked up in each second-level directory.
    #[serde(default = "default_descriptor_name")]
    pub descriptor_name: String,
}

fn default_max_workers() -> usize {
    6
}

fn default_timeout_secs() -> u64 {
    3000
}

fn default_max_retry_rounds() -> u32 {
    3
}

fn default_retry_compile_failures() -> bool {
    true
}

fn default_max_nav_depth() -> usize {
    6
}

fn default_compiler_bin() -> String {
    "doxygen".to_string()
}

fn default_descriptor_name() -> String {
    "Doxyfile".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            timeout_secs: default_timeout_secs(),
            max_retry_rounds: default_max_retry_rounds(),
            retry_compile_failures: default_retry_compile_failures(),
            max_nav_depth: default_max_nav_depth(),
            compiler_bin: default_compiler_bin(),
            descriptor_name: default_descriptor_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "doxbuild_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}
