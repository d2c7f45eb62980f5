use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "doxbuild", about = "Parallel documentation build orchestrator")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile every documentation unit found under the output folder,
    /// verify the results and retry failures.
    Build(BuildArgs),
    /// Depth-limit one navigation file in place.
    Prune(PruneArgs),
    /// Scan the catalog and verify existing output without compiling.
    Verify(VerifyArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BuildArgs {
    /// Root output folder containing the doxygen/sub descriptor tree.
    pub output_folder: PathBuf,

    /// Worker pool width for parallel compiler invocations.
    #[arg(long)]
    pub max_workers: Option<usize>,

    /// Hard per-task subprocess timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Retry rounds after the initial attempt.
    #[arg(long)]
    pub rounds: Option<u32>,

    /// External compiler binary.
    #[arg(long)]
    pub compiler_bin: Option<String>,

    /// Descriptor file name looked up in each unit directory.
    #[arg(long)]
    pub descriptor_name: Option<String>,

    /// Do not re-attempt tasks that exited non-zero; only verification
    /// failures and timeouts re-enter the retry loop.
    #[arg(long)]
    pub no_retry_compile_failures: bool,

    /// Write the full execution report as JSON to this path.
    #[arg(long)]
    pub report_json: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PruneArgs {
    /// Navigation file to rewrite in place.
    pub file: PathBuf,

    /// Maximum nesting level to keep.
    #[arg(long, default_value_t = 6)]
    pub max_depth: usize,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct VerifyArgs {
    /// Root output folder containing the doxygen/sub descriptor tree.
    pub output_folder: PathBuf,

    /// Descriptor file name looked up in each unit directory.
    #[arg(long)]
    pub descriptor_name: Option<String>,
}
