//! Post-compilation artifact verification.
//!
//! The external compiler can exit 0 while leaving the output tree
//! incomplete (resource exhaustion, malformed input), so exit-code success
//! is necessary but never sufficient. Every check reports the first
//! missing artifact by name.

use std::path::Path;

use crate::executor::types::BuildTask;
use crate::nav;
use crate::util::read_to_string_tolerant;

/// Entry pages every rendered tree must contain.
pub const EXPECTED_PAGES: &[&str] = &["index.html", "files.html"];

/// Navigation file checked for tag balance when the compiler emits one.
pub const NAV_FILE: &str = "index.hhc";

/// Why a completed task failed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyFailure {
    /// Name of the missing or malformed artifact.
    pub missing: String,
}

impl std::fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing or malformed artifact: {}", self.missing)
    }
}

/// Confirm that a completed task produced a usable output tree.
pub fn verify_output(task: &BuildTask) -> Result<(), VerifyFailure> {
    if !task.output_dir.is_dir() {
        return Err(VerifyFailure {
            missing: "output directory".to_string(),
        });
    }

    let html_dir = task.html_dir();
    if !html_dir.is_dir() {
        return Err(VerifyFailure {
            missing: "html/".to_string(),
        });
    }

    for page in EXPECTED_PAGES {
        if !html_dir.join(page).is_file() {
            return Err(VerifyFailure {
                missing: (*page).to_string(),
            });
        }
    }

    verify_navigation(&html_dir)
}

/// Tag-balance check of the generated navigation file. The file is only
/// present when the compiler is configured to emit one, so absence is not
/// a failure; imbalance is.
fn verify_navigation(html_dir: &Path) -> Result<(), VerifyFailure> {
    let nav_path = html_dir.join(NAV_FILE);
    if !nav_path.is_file() {
        return Ok(());
    }

    let content = read_to_string_tolerant(&nav_path).map_err(|e| {
        tracing::warn!(path = %nav_path.display(), error = %e, "navigation file unreadable");
        VerifyFailure {
            missing: NAV_FILE.to_string(),
        }
    })?;

    if nav::check_balance(&content) {
        Ok(())
    } else {
        Err(VerifyFailure {
            missing: format!("{NAV_FILE} (unbalanced)"),
        })
    }
}
