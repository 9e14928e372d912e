//! Downscale policy for oversized images.

use image::imageops::FilterType;
use image::DynamicImage;

/// Returns the dimensions an image should be encoded at.
///
/// Images within `threshold` on both axes are left alone. Otherwise both
/// axes are scaled by `min(threshold / w, threshold / h)`, which is
/// `threshold / max(w, h)`, and truncated to whole pixels, never below 1.
/// The arithmetic is done on integers so the longer side lands exactly on
/// `threshold`. Never upscales.
pub fn target_dimensions(width: u32, height: u32, threshold: u32) -> (u32, u32) {
    if width <= threshold && height <= threshold {
        return (width, height);
    }

    let longest = u64::from(width.max(height));
    let scaled = |side: u32| ((u64::from(side) * u64::from(threshold) / longest) as u32).max(1);

    (scaled(width), scaled(height))
}

/// Applies the downscale policy, resampling with Lanczos3.
///
/// Returns the original image untouched when no resize is needed.
pub fn apply_resize(image: DynamicImage, threshold: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    let (target_w, target_h) = target_dimensions(width, height, threshold);

    if (target_w, target_h) == (width, height) {
        return image;
    }

    image.resize_exact(target_w, target_h, FilterType::Lanczos3)
}
