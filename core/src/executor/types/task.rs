use std::path::PathBuf;

/// One independently compilable documentation unit.
///
/// Created once by the catalog scan and immutable afterwards; workers only
/// ever borrow or clone it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTask {
    /// Composite identifier: `first_level/second_level`.
    pub name: String,
    /// Absolute path of the compiler's input descriptor file.
    pub descriptor_path: PathBuf,
    /// Absolute output directory, resolved from the descriptor's
    /// `OUTPUT_DIRECTORY` directive before the task is admitted.
    pub output_dir: PathBuf,
}

impl BuildTask {
    pub fn new(name: impl Into<String>, descriptor_path: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            name: name.into(),
            descriptor_path,
            output_dir,
        }
    }

    /// Directory where the rendered pages land.
    pub fn html_dir(&self) -> PathBuf {
        self.output_dir.join("html")
    }
}
