use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::{BatchSummary, ImageTask, OptimizerSettings};
use crate::processing::executor::optimize_single;
use crate::reporting::Reporter;
use crate::utils::{create_dir_all, list_images, validate_source_dir, OptimizerResult};

/// Converts every eligible image directly inside one directory.
pub struct BatchProcessor {
    settings: OptimizerSettings,
}

impl BatchProcessor {
    pub fn new(settings: OptimizerSettings) -> Self {
        debug!("Creating BatchProcessor with {:?}", settings);
        Self { settings }
    }

    /// Processes the images in `source_dir`, writing WebPs into `output_dir`
    /// (defaults to `source_dir`).
    ///
    /// Returns `Ok(None)` when the path is missing or not a directory, or
    /// when it holds no eligible images; nothing is written in that case.
    /// Per-file failures are reported and recorded in the summary, and never
    /// abort the pass.
    pub fn process(
        &self,
        source_dir: &Path,
        output_dir: Option<&Path>,
        reporter: &mut dyn Reporter,
    ) -> OptimizerResult<Option<BatchSummary>> {
        if let Err(e) = validate_source_dir(source_dir) {
            if e.is_not_found() {
                reporter.error(&format!("Directory not found: {}", source_dir.display()));
            } else {
                reporter.error(&e.to_string());
            }
            return Ok(None);
        }

        let output_dir = output_dir.unwrap_or(source_dir);
        create_dir_all(output_dir)?;

        let images = list_images(source_dir)?;
        if images.is_empty() {
            reporter.info(&format!("No images found in {}", source_dir.display()));
            return Ok(None);
        }

        reporter.found(images.len());

        let mut summary = BatchSummary::new();
        for input_path in images {
            let task = ImageTask::new(input_path, output_dir);
            let file_name = task.file_name();
            reporter.process(&file_name);

            match optimize_single(&task, &self.settings, reporter) {
                Ok(result) => {
                    reporter.file_result(&result);
                    summary.record(result);
                }
                Err(e) if e.is_not_found() => {
                    // Listed a moment ago but gone now
                    reporter.warn(&format!("File not found: {}", task.input_path.display()));
                    summary.record_failure(file_name, e.to_string());
                }
                Err(e) => {
                    warn!("Image optimization failed for {}: {}", task.input_path.display(), e);
                    reporter.error(&format!("Processing {}: {}", task.input_path.display(), e));
                    summary.record_failure(file_name, e.to_string());
                }
            }
        }

        reporter.summary(&summary);

        if summary.failures.is_empty() {
            info!(
                "Directory {} completed: {} files converted",
                source_dir.display(),
                summary.processed_count()
            );
        } else {
            warn!(
                "Directory {} completed with {} failed files out of {}",
                source_dir.display(),
                summary.failures.len(),
                summary.failures.len() + summary.processed_count()
            );
        }

        Ok(Some(summary))
    }
}
