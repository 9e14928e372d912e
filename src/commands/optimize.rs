//! Project-level driver: the root directory plus every configured content root.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::{BatchSummary, RunConfig};
use crate::processing::BatchProcessor;
use crate::reporting::Reporter;
use crate::utils::{OptimizerError, OptimizerResult};

/// Summary of one processed directory.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryReport {
    pub directory: PathBuf,
    pub summary: BatchSummary,
}

/// Everything a run produced, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectReport {
    pub directories: Vec<DirectoryReport>,
}

impl ProjectReport {
    pub fn total_converted(&self) -> usize {
        self.directories.iter().map(|d| d.summary.processed_count()).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.directories.iter().map(|d| d.summary.failures.len()).sum()
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> OptimizerResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| OptimizerError::io(format!("Failed to serialize report: {e}")))?;
        fs::write(path, json)
            .map_err(|e| OptimizerError::io(format!("Failed to write {}: {e}", path.display())))
    }
}

/// Converts the images of a project in place.
///
/// The project directory itself is processed first, then each content root
/// that exists under it. Missing content roots are skipped silently; a
/// directory that fails to list is reported and the run moves on.
pub fn optimize_project(
    project_dir: &Path,
    config: &RunConfig,
    reporter: &mut dyn Reporter,
) -> OptimizerResult<ProjectReport> {
    config.validate()?;

    reporter.banner("Image Optimizer");
    let display_dir = project_dir
        .canonicalize()
        .unwrap_or_else(|_| project_dir.to_path_buf());
    reporter.info(&format!("Project directory: {}", display_dir.display()));

    let processor = BatchProcessor::new(config.settings);
    let mut report = ProjectReport::default();

    reporter.step("Processing root directory...");
    process_directory(&processor, project_dir, reporter, &mut report);

    for root in &config.content_roots {
        let dir = project_dir.join(root);
        if !dir.exists() {
            debug!("Content root {} not present, skipping", dir.display());
            continue;
        }

        reporter.step(&format!("Processing: {root}/"));
        process_directory(&processor, &dir, reporter, &mut report);
    }

    reporter.done();

    debug!(
        "Run finished: {} directories, {} converted, {} failed",
        report.directories.len(),
        report.total_converted(),
        report.total_failed()
    );

    Ok(report)
}

fn process_directory(
    processor: &BatchProcessor,
    dir: &Path,
    reporter: &mut dyn Reporter,
    report: &mut ProjectReport,
) {
    match processor.process(dir, Some(dir), reporter) {
        Ok(Some(summary)) => report.directories.push(DirectoryReport {
            directory: dir.to_path_buf(),
            summary,
        }),
        Ok(None) => {}
        Err(e) => {
            warn!("Skipping directory {}: {}", dir.display(), e);
            reporter.error(&format!("Processing directory {}: {}", dir.display(), e));
        }
    }
}
