//! Image processing: the per-file WebP transform and the directory pass.
//!
//! - [`optimize_single`]: decode, downscale, encode and measure one image.
//! - [`BatchProcessor`]: runs the transform over one directory.

mod batch;
mod encoder;
mod executor;
mod resize;

pub use batch::BatchProcessor;
pub use encoder::{encode_webp, ChannelLayout, EncodedWebp};
pub use executor::optimize_single;
pub use resize::{apply_resize, target_dimensions};
