//! Entry points used by the command-line binary.

pub mod optimize;

pub use optimize::{optimize_project, DirectoryReport, ProjectReport};
