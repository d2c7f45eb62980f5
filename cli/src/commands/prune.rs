use doxbuild_core::error::CliError;
use doxbuild_core::nav;

use super::cli::PruneArgs;

pub fn run(args: PruneArgs) -> Result<i32, CliError> {
    if !args.file.is_file() {
        return Err(CliError::Command(format!(
            "not a file: {}",
            args.file.display()
        )));
    }

    let changed = nav::limit_file(&args.file, args.max_depth)?;
    if changed {
        println!("pruned to depth {}: {}", args.max_depth, args.file.display());
    } else {
        println!("already within depth {}", args.max_depth);
    }
    Ok(0)
}
