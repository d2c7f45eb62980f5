use doxbuild_core::catalog;
use doxbuild_core::config::AppConfig;
use doxbuild_core::error::CliError;
use doxbuild_core::verify::verify_output;

use super::cli::VerifyArgs;

/// Re-check existing output trees without compiling anything.
pub fn run(args: VerifyArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let descriptor_name = args
        .descriptor_name
        .as_deref()
        .unwrap_or(&cfg.build.descriptor_name);

    let tasks = catalog::scan_catalog(&args.output_folder, descriptor_name);
    if tasks.is_empty() {
        println!("no build descriptors found");
        return Ok(0);
    }

    let mut failed = 0usize;
    for task in &tasks {
        match verify_output(task) {
            Ok(()) => println!("ok      {}", task.name),
            Err(failure) => {
                failed += 1;
                println!("FAILED  {} ({failure})", task.name);
            }
        }
    }

    println!("{} of {} verified", tasks.len() - failed, tasks.len());
    Ok(if failed == 0 { 0 } else { 1 })
}
