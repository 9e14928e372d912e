//! Core types shared by the transform, directory and driver layers.
//!
//! - [`OptimizerSettings`]: immutable conversion settings
//! - [`RunConfig`]: settings plus the content roots to visit
//! - [`ImageTask`]: one source image and its output directory
//! - [`TransformResult`]: outcome of converting one image
//! - [`BatchSummary`]: results and totals for one directory pass

mod config;
mod task;
mod types;

pub use config::{RunConfig, DEFAULT_CONTENT_ROOTS};
pub use task::ImageTask;
pub use types::{savings_percent, BatchSummary, FailedFile, OptimizerSettings, TransformResult};
