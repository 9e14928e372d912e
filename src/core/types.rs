//! Core types for optimization settings and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration settings for WebP conversion.
///
/// Built once at startup and passed by reference into the transform and
/// directory components; nothing mutates it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizerSettings {
    /// Lossy WebP quality (0-100)
    pub webp_quality: u8,
    /// libwebp effort level (0 = fastest, 6 = smallest output)
    pub webp_method: u8,
    /// Images wider or taller than this many pixels are scaled down to fit
    pub resize_threshold: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            webp_quality: 85,
            webp_method: 6,
            resize_threshold: 2000,
        }
    }
}

/// Result of converting one image to WebP.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    /// File name of the source image
    pub file: String,
    /// Path of the WebP that was written
    pub output_path: PathBuf,
    /// Source file size in KB
    pub original_size_kb: f64,
    /// Produced WebP size in KB
    pub webp_size_kb: f64,
    /// Mirrors `original_size_kb`; the source is never re-encoded
    pub optimized_png_kb: f64,
    /// Size reduction of the WebP relative to the source, one decimal
    pub savings_percent: f64,
    /// Decoded source dimensions (width, height)
    pub original_dimensions: (u32, u32),
    /// Encoded WebP dimensions (width, height)
    pub output_dimensions: (u32, u32),
    /// Whether the WebP carries an alpha channel
    pub has_alpha: bool,
}

impl TransformResult {
    /// True when the image was scaled down before encoding.
    pub fn was_resized(&self) -> bool {
        self.original_dimensions != self.output_dimensions
    }
}

/// Computes `round((1 - webp / original) * 100, 1)`.
///
/// Returns `0.0` when the original size is zero.
pub fn savings_percent(original_kb: f64, webp_kb: f64) -> f64 {
    if original_kb > 0.0 {
        round_to_tenth((1.0 - webp_kb / original_kb) * 100.0)
    } else {
        0.0
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A file that was skipped during a directory pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedFile {
    pub file: String,
    pub error: String,
}

/// Results and running totals for one directory pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Successful conversions, in processing order
    pub results: Vec<TransformResult>,
    /// Files that were skipped
    pub failures: Vec<FailedFile>,
    /// Sum of source sizes in KB
    pub total_original_kb: f64,
    /// Sum of WebP sizes in KB
    pub total_webp_kb: f64,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a successful result and folds it into the totals.
    pub fn record(&mut self, result: TransformResult) {
        self.total_original_kb += result.original_size_kb;
        self.total_webp_kb += result.webp_size_kb;
        self.results.push(result);
    }

    pub fn record_failure(&mut self, file: impl Into<String>, error: impl Into<String>) {
        self.failures.push(FailedFile {
            file: file.into(),
            error: error.into(),
        });
    }

    /// Aggregate savings, or `None` when nothing with a non-zero size was converted.
    pub fn total_savings_percent(&self) -> Option<f64> {
        if self.total_original_kb > 0.0 {
            Some((1.0 - self.total_webp_kb / self.total_original_kb) * 100.0)
        } else {
            None
        }
    }

    pub fn processed_count(&self) -> usize {
        self.results.len()
    }
}
