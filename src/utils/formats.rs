use std::path::Path;
use crate::utils::{OptimizerError, OptimizerResult};

/// Source formats the optimizer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    JPEG,
    PNG,
}

impl SourceFormat {
    /// Get file extensions associated with this format.
    ///
    /// Matching is case-sensitive: only all-lowercase and all-uppercase
    /// spellings are eligible, so `photo.Png` is ignored.
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::JPEG => &["jpg", "jpeg", "JPG", "JPEG"],
            Self::PNG => &["png", "PNG"],
        }
    }

    /// Check if the extension matches this format
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions().contains(&ext)
    }

    /// Resolve an extension to a source format, if it is an eligible one.
    pub fn from_extension(ext: &str) -> Option<Self> {
        [Self::PNG, Self::JPEG]
            .into_iter()
            .find(|format| format.matches_extension(ext))
    }

    /// The `image` crate format used to decode this source.
    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            Self::JPEG => image::ImageFormat::Jpeg,
            Self::PNG => image::ImageFormat::Png,
        }
    }
}

/// Get the source format of a path, or `None` when it is not an eligible image.
pub fn format_from_path(path: &Path) -> Option<SourceFormat> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(SourceFormat::from_extension)
}

/// Verifies that every codec the optimizer depends on is compiled in.
///
/// Decoding of PNG and JPEG comes from `image` feature flags; WebP encoding
/// is linked statically through libwebp and is always present.
pub fn ensure_codecs_available() -> OptimizerResult<()> {
    let missing: Vec<&str> = [SourceFormat::PNG, SourceFormat::JPEG]
        .iter()
        .filter(|format| !format.image_format().reading_enabled())
        .map(|format| format.extensions()[0])
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(OptimizerError::codec(format!(
            "no decoder for: {}",
            missing.join(", ")
        )))
    }
}
