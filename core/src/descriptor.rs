//! Typed resolution of directives inside a compiler descriptor file.
//!
//! The descriptor is a flat key-value text file; the orchestrator only ever
//! reads one directive from it. Callers must handle the directive being
//! absent — `Ok(None)` is a normal answer, not an error.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::util::read_to_string_tolerant;

const OUTPUT_DIRECTORY_KEY: &str = "OUTPUT_DIRECTORY";

/// Resolve the output directory declared by a descriptor file.
///
/// The first `OUTPUT_DIRECTORY = <path>` line wins. Relative values are
/// resolved against the descriptor's own directory.
pub fn output_directory(descriptor_path: &Path) -> anyhow::Result<Option<PathBuf>> {
    let content = read_to_string_tolerant(descriptor_path)
        .with_context(|| format!("read descriptor {}", descriptor_path.display()))?;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with(OUTPUT_DIRECTORY_KEY) {
            continue;
        }
        let rest = &trimmed[OUTPUT_DIRECTORY_KEY.len()..];
        let Some(eq) = rest.find('=') else {
            continue;
        };
        // Guard against keys that merely share the prefix, e.g.
        // "OUTPUT_DIRECTORY_FOO = ...".
        if !rest[..eq].trim().is_empty() {
            continue;
        }
        let value = rest[eq + 1..].trim().trim_matches('"');
        if value.is_empty() {
            return Ok(None);
        }

        let path = PathBuf::from(value);
        let resolved = if path.is_absolute() {
            path
        } else {
            descriptor_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(path)
        };
        return Ok(Some(normalize(&resolved)));
    }

    Ok(None)
}

/// Lexical cleanup of `.` and `..` components so that cleanup and
/// verification act on the same path the compiler writes to.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                if !out.pop() {
                    out.push(comp);
                }
            }
            other => out.push(other),
        }
    }
    out
}
