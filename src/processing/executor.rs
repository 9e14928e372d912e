//! Single-image transform: decode → optional resize → WebP encode → measure.
//!
//! The decoded image lives only for the duration of one call and is dropped
//! before returning, on the error paths too, so at most one decoded buffer is
//! alive at a time.

use std::path::Path;
use image::{DynamicImage, ImageReader, Limits};
use tracing::debug;

use crate::core::{savings_percent, ImageTask, OptimizerSettings, TransformResult};
use crate::reporting::Reporter;
use crate::utils::{
    create_dir_all,
    get_file_size_kb,
    validate_input_path,
    write_atomic,
    OptimizerError,
    OptimizerResult,
};

use super::encoder::encode_webp;
use super::resize::apply_resize;

/// Converts one image to WebP next to `task.output_dir`.
///
/// A missing input is reported as a not-found validation error before any
/// decoding is attempted. The source file is never modified; the only file
/// written is `<output_dir>/<stem>.webp`, which is replaced if it exists.
pub fn optimize_single(
    task: &ImageTask,
    settings: &OptimizerSettings,
    reporter: &mut dyn Reporter,
) -> OptimizerResult<TransformResult> {
    let input_path = &task.input_path;
    validate_input_path(input_path)?;

    // Original size before any transformation
    let original_size_kb = get_file_size_kb(input_path)?;

    create_dir_all(&task.output_dir)?;

    let image = decode_image(input_path)?;
    let original_dimensions = (image.width(), image.height());

    debug!(
        "Loaded '{}': {}x{} {:?}",
        task.file_name(),
        original_dimensions.0,
        original_dimensions.1,
        image.color()
    );

    let image = apply_resize(image, settings.resize_threshold);
    let output_dimensions = (image.width(), image.height());
    if output_dimensions != original_dimensions {
        reporter.resize(original_dimensions, output_dimensions);
    }

    let encoded = encode_webp(&image, settings)?;
    drop(image);

    let output_path = task.webp_output_path();
    write_atomic(&output_path, &encoded.data)?;
    let webp_size_kb = get_file_size_kb(&output_path)?;

    let result = TransformResult {
        file: task.file_name(),
        output_path,
        original_size_kb,
        webp_size_kb,
        optimized_png_kb: original_size_kb,
        savings_percent: savings_percent(original_size_kb, webp_size_kb),
        original_dimensions,
        output_dimensions,
        has_alpha: encoded.has_alpha,
    };

    debug!(
        "'{}' -> {} ({:.1} KB -> {:.1} KB, {:.1}%)",
        result.file,
        result.output_path.display(),
        original_size_kb,
        webp_size_kb,
        result.savings_percent
    );

    Ok(result)
}

/// Allocation limits for decoding. Oversized sources are exactly what the
/// resize step is for, so the reader's default 512 MiB cap is lifted.
fn decode_limits() -> Limits {
    Limits::no_limits()
}

/// Decodes an image, sniffing the format from its content so a mislabelled
/// extension still loads.
fn decode_image(path: &Path) -> OptimizerResult<DynamicImage> {
    let mut reader = ImageReader::open(path)
        .map_err(|e| OptimizerError::io(format!("Cannot open input file: {e}")))?
        .with_guessed_format()
        .map_err(|e| OptimizerError::io(format!("Cannot read input file: {e}")))?;
    reader.limits(decode_limits());

    reader
        .decode()
        .map_err(|e| OptimizerError::decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::ConsoleReporter;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::fs;
    use tempfile::TempDir;

    fn run(task: &ImageTask, settings: &OptimizerSettings) -> (OptimizerResult<TransformResult>, String) {
        let mut reporter = ConsoleReporter::new(Vec::new());
        let result = optimize_single(task, settings, &mut reporter);
        (result, String::from_utf8(reporter.into_inner()).unwrap())
    }

    #[test]
    fn test_converts_png_in_place() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("01.png");
        RgbaImage::from_fn(40, 30, |x, _| Rgba([255, 0, 0, if x < 20 { 0 } else { 255 }]))
            .save(&input)
            .unwrap();
        let before = fs::read(&input).unwrap();

        let (result, out) = run(&ImageTask::in_place(&input), &OptimizerSettings::default());
        let result = result.unwrap();

        assert_eq!(result.file, "01.png");
        assert_eq!(result.output_path, dir.path().join("01.webp"));
        assert!(result.output_path.exists());
        assert_eq!(result.original_dimensions, (40, 30));
        assert_eq!(result.output_dimensions, (40, 30));
        assert!(result.has_alpha);
        assert_eq!(result.optimized_png_kb, result.original_size_kb);
        assert_eq!(
            result.savings_percent,
            savings_percent(result.original_size_kb, result.webp_size_kb)
        );
        assert!(!out.contains("[RESIZE]"));
        // Source untouched
        assert_eq!(fs::read(&input).unwrap(), before);
    }

    #[test]
    fn test_oversized_image_is_downscaled() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("wide.jpg");
        RgbImage::from_pixel(300, 150, Rgb([10, 120, 200])).save(&input).unwrap();

        let settings = OptimizerSettings { resize_threshold: 200, ..OptimizerSettings::default() };
        let (result, out) = run(&ImageTask::in_place(&input), &settings);
        let result = result.unwrap();

        assert_eq!(result.output_dimensions, (200, 100));
        assert!(result.was_resized());
        assert!(!result.has_alpha);
        assert!(out.contains("   [RESIZE] 300x150 -> 200x100"));

        let decoded = image::open(&result.output_path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 100));
    }

    #[test]
    fn test_writes_into_separate_output_dir() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("photo.JPEG");
        RgbImage::from_pixel(8, 8, Rgb([1, 2, 3])).save_with_format(&input, image::ImageFormat::Jpeg).unwrap();
        let out_dir = dir.path().join("out/nested");

        let (result, _) = run(&ImageTask::new(&input, &out_dir), &OptimizerSettings::default());

        assert_eq!(result.unwrap().output_path, out_dir.join("photo.webp"));
        assert!(out_dir.join("photo.webp").exists());
    }

    #[test]
    fn test_opaque_rgba_png_has_no_alpha() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("flat.png");
        RgbaImage::from_pixel(32, 32, Rgba([40, 80, 120, 255])).save(&input).unwrap();

        let (result, _) = run(&ImageTask::in_place(&input), &OptimizerSettings::default());
        let result = result.unwrap();

        let decoded = image::open(&result.output_path).unwrap();
        assert_eq!(result.has_alpha, decoded.color().has_alpha());
        assert!(!result.has_alpha);
    }

    #[test]
    fn test_decode_limits_allow_large_sources() {
        // 13400x13400 RGB8 is just over the reader's default 512 MiB cap
        let decoded_bytes = 13_400u64 * 13_400 * 3;

        let mut default_limits = Limits::default();
        assert!(default_limits.reserve(decoded_bytes).is_err());

        let mut limits = decode_limits();
        assert!(limits.max_alloc.is_none());
        assert!(limits.reserve(decoded_bytes).is_ok());
        assert!(limits.check_dimensions(20_000, 20_000).is_ok());
    }

    #[test]
    fn test_large_png_is_downscaled() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("poster.png");
        RgbImage::from_fn(4000, 3000, |x, y| Rgb([(x % 251) as u8, (y % 241) as u8, 90]))
            .save(&input)
            .unwrap();

        let (result, out) = run(&ImageTask::in_place(&input), &OptimizerSettings::default());
        let result = result.unwrap();

        assert_eq!(result.original_dimensions, (4000, 3000));
        assert_eq!(result.output_dimensions, (2000, 1500));
        assert!(out.contains("[RESIZE] 4000x3000 -> 2000x1500"));
        let decoded = image::open(&result.output_path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2000, 1500));
    }

    #[test]
    fn test_missing_input_is_not_found() {
        let dir = TempDir::new().unwrap();
        let task = ImageTask::in_place(dir.path().join("gone.png"));

        let (result, _) = run(&task, &OptimizerSettings::default());

        assert!(result.unwrap_err().is_not_found());
        assert!(!dir.path().join("gone.webp").exists());
    }

    #[test]
    fn test_corrupt_input_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.png");
        fs::write(&input, b"\x89PNG\r\n\x1a\nthis is not really a png").unwrap();

        let (result, _) = run(&ImageTask::in_place(&input), &OptimizerSettings::default());

        assert!(matches!(result, Err(OptimizerError::Decode(_))));
        assert!(!dir.path().join("broken.webp").exists());
    }
}
