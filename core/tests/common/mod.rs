use std::path::{Path, PathBuf};

/// Write an executable stub compiler script into `dir`.
#[cfg(unix)]
pub fn write_stub_compiler(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("stub-compiler.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Lay out one catalog unit: `<root>/doxygen/sub/<group>/<unit>/Doxyfile`
/// declaring `out` as its output directory.
pub fn make_unit(root: &Path, group: &str, unit: &str) -> PathBuf {
    let dir = root.join("doxygen").join("sub").join(group).join(unit);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("Doxyfile"), "OUTPUT_DIRECTORY = out\n").unwrap();
    dir
}
