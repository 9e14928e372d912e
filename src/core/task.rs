//! Image task definition.

use std::path::{Path, PathBuf};

/// Represents a single image conversion task.
///
/// Contains the source path and the directory the WebP will be written to.
#[derive(Debug, Clone)]
pub struct ImageTask {
    /// Path to the source image file
    pub input_path: PathBuf,
    /// Directory where `<stem>.webp` will be written
    pub output_dir: PathBuf,
}

impl ImageTask {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Creates a task that writes next to its source.
    pub fn in_place(input_path: impl Into<PathBuf>) -> Self {
        let input_path = input_path.into();
        let output_dir = input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self { input_path, output_dir }
    }

    /// File name of the source, for display.
    pub fn file_name(&self) -> String {
        self.input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.input_path.display().to_string())
    }

    /// `output_dir/<input_stem>.webp`
    pub fn webp_output_path(&self) -> PathBuf {
        let stem = self
            .input_path
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| "output".into());
        let mut name = stem;
        name.push(".webp");
        self.output_dir.join(name)
    }
}
