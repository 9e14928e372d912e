// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod reporting;
pub mod processing;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{BatchSummary, ImageTask, OptimizerSettings, RunConfig, TransformResult};
pub use crate::utils::{OptimizerError, OptimizerResult};
pub use crate::commands::*;
