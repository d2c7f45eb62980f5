use doxbuild_core::config::AppConfig;
use doxbuild_core::error::CliError;
use doxbuild_core::{BuildEngine, BuildOpts, ExecutionReport};

use super::cli::BuildArgs;

pub async fn run(args: BuildArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let mut opts = BuildOpts::from_config(&cfg.build);

    if let Some(n) = args.max_workers {
        opts.max_workers = n.max(1);
    }
    if let Some(secs) = args.timeout_secs {
        opts.timeout = std::time::Duration::from_secs(secs);
    }
    if let Some(rounds) = args.rounds {
        opts.max_retry_rounds = rounds;
    }
    if let Some(bin) = args.compiler_bin {
        opts.compiler_bin = bin;
    }
    if let Some(name) = args.descriptor_name {
        opts.descriptor_name = name;
    }
    if args.no_retry_compile_failures {
        opts.retry_compile_failures = false;
    }
    opts.progress_bar = atty::is(atty::Stream::Stderr);

    let engine = BuildEngine::new(opts);
    let report = engine.run(&args.output_folder).await?;

    print_summary(&report);

    if let Some(path) = args.report_json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::Command(format!("serialize report: {e}")))?;
        std::fs::write(&path, json)?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(if report.is_success() { 0 } else { 1 })
}

fn print_summary(report: &ExecutionReport) {
    println!("processed: {}", report.total);
    println!("succeeded: {}", report.succeeded);
    println!("failed:    {}", report.failed);
    for stats in &report.rounds {
        println!(
            "  round {}: {} attempted, {} ok, {} failed",
            stats.round, stats.attempted, stats.succeeded, stats.failed
        );
    }
    println!(
        "duration:  {}",
        doxbuild_core::util::format_duration(report.duration.as_secs_f64())
    );
    for name in report.failing_tasks() {
        println!("still failing: {name}");
    }
}
