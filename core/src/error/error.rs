use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("pipeline failed: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Infrastructure faults only. A task that compiles badly, times out or
/// fails verification is report data, never a `PipelineError`.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("config error: {0}")]
    Config(String),
    #[error("catalog scan failed: {0}")]
    Catalog(String),
    #[error("semaphore closed unexpectedly")]
    PoolClosed,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
