//! Task catalog construction.
//!
//! Build descriptors live exactly two directory levels below
//! `<root>/doxygen/sub` (group / sub-group). Deeper nesting is flattened
//! upstream by path-hashing before the descriptors are laid out, so the
//! scan deliberately does not recurse further.

use std::path::Path;

use crate::descriptor;
use crate::executor::types::BuildTask;

/// Directory under the output root holding the per-unit descriptors.
pub const SUB_TREE: &[&str] = &["doxygen", "sub"];

/// Enumerate two levels of subdirectories and emit one task per
/// second-level directory containing the descriptor file.
///
/// A missing or unreadable root yields an empty catalog with a warning;
/// it is not fatal to the overall run. The catalog is sorted by task name
/// so runs are deterministic regardless of directory iteration order.
pub fn scan_catalog(root: &Path, descriptor_name: &str) -> Vec<BuildTask> {
    let sub_root = SUB_TREE.iter().fold(root.to_path_buf(), |p, s| p.join(s));

    let first_levels = match std::fs::read_dir(&sub_root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(root = %sub_root.display(), error = %e, "catalog root unreadable, empty catalog");
            return Vec::new();
        }
    };

    let mut tasks = Vec::new();

    for first in first_levels.flatten() {
        let first_path = first.path();
        if !first_path.is_dir() {
            continue;
        }

        let second_levels = match std::fs::read_dir(&first_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %first_path.display(), error = %e, "group directory unreadable, skipping");
                continue;
            }
        };

        for second in second_levels.flatten() {
            let second_path = second.path();
            if !second_path.is_dir() {
                continue;
            }

            let descriptor_path = second_path.join(descriptor_name);
            if !descriptor_path.is_file() {
                continue;
            }

            let name = format!(
                "{}/{}",
                first.file_name().to_string_lossy(),
                second.file_name().to_string_lossy()
            );

            match descriptor::output_directory(&descriptor_path) {
                Ok(Some(output_dir)) => {
                    tasks.push(BuildTask::new(name, descriptor_path, output_dir));
                }
                Ok(None) => {
                    tracing::warn!(task = %name, "descriptor has no output directory directive, skipping");
                }
                Err(e) => {
                    tracing::warn!(task = %name, error = %e, "descriptor unreadable, skipping");
                }
            }
        }
    }

    tasks.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::info!(count = tasks.len(), root = %sub_root.display(), "catalog scan complete");
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_unit(root: &Path, group: &str, unit: &str, descriptor: Option<&str>) {
        let dir = root.join("doxygen").join("sub").join(group).join(unit);
        std::fs::create_dir_all(&dir).unwrap();
        if let Some(content) = descriptor {
            std::fs::write(dir.join("Doxyfile"), content).unwrap();
        }
    }

    #[test]
    fn finds_descriptors_two_levels_deep_only() {
        let tmp = tempfile::tempdir().unwrap();
        add_unit(tmp.path(), "periph", "gpio", Some("OUTPUT_DIRECTORY = out\n"));
        add_unit(tmp.path(), "periph", "uart", Some("OUTPUT_DIRECTORY = out\n"));
        add_unit(tmp.path(), "system", "clocks", Some("OUTPUT_DIRECTORY = out\n"));

        // Third-level descriptor must be ignored.
        let deep = tmp
            .path()
            .join("doxygen/sub/periph/gpio/nested");
        std::fs::create_dir_all(&deep).unwrap();
        std::fs::write(deep.join("Doxyfile"), "OUTPUT_DIRECTORY = out\n").unwrap();

        let tasks = scan_catalog(tmp.path(), "Doxyfile");
        let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["periph/gpio", "periph/uart", "system/clocks"]);
    }

    #[test]
    fn directories_without_descriptor_are_skipped_silently() {
        let tmp = tempfile::tempdir().unwrap();
        add_unit(tmp.path(), "periph", "gpio", Some("OUTPUT_DIRECTORY = out\n"));
        add_unit(tmp.path(), "periph", "empty", None);

        let tasks = scan_catalog(tmp.path(), "Doxyfile");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "periph/gpio");
    }

    #[test]
    fn missing_root_yields_empty_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(scan_catalog(&tmp.path().join("nope"), "Doxyfile").is_empty());
    }

    #[test]
    fn descriptor_without_output_directive_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        add_unit(tmp.path(), "periph", "gpio", Some("PROJECT_NAME = gpio\n"));
        assert!(scan_catalog(tmp.path(), "Doxyfile").is_empty());
    }

    #[test]
    fn output_dir_resolves_relative_to_descriptor() {
        let tmp = tempfile::tempdir().unwrap();
        add_unit(
            tmp.path(),
            "periph",
            "gpio",
            Some("OUTPUT_DIRECTORY = ../../../out/periph/gpio\n"),
        );
        let tasks = scan_catalog(tmp.path(), "Doxyfile");
        assert_eq!(
            tasks[0].output_dir,
            tmp.path().join("doxygen").join("out/periph/gpio")
        );
    }
}
