use std::path::Path;
use crate::core::OptimizerSettings;
use crate::utils::{OptimizerResult, ValidationError};

/// Highest effort level libwebp accepts for `method`.
pub const MAX_WEBP_METHOD: u8 = 6;

/// Largest width or height a WebP image can have.
pub const MAX_WEBP_DIMENSION: u32 = 16383;

/// Validates that the input path exists and is a regular file
pub fn validate_input_path(path: &Path) -> OptimizerResult<()> {
    if !path.exists() {
        return Err(ValidationError::path_not_found(path).into());
    }

    if !path.is_file() {
        return Err(ValidationError::not_a_file(path).into());
    }

    Ok(())
}

/// Validates that a source directory exists and is a directory
pub fn validate_source_dir(path: &Path) -> OptimizerResult<()> {
    if !path.exists() {
        return Err(ValidationError::path_not_found(path).into());
    }

    if !path.is_dir() {
        return Err(ValidationError::not_a_directory(path).into());
    }

    Ok(())
}

/// Validates image processing settings
pub fn validate_settings(settings: &OptimizerSettings) -> OptimizerResult<()> {
    if settings.webp_quality > 100 {
        return Err(ValidationError::settings(format!(
            "Invalid quality value: {}. Must be between 0 and 100",
            settings.webp_quality
        ))
        .into());
    }

    if settings.webp_method > MAX_WEBP_METHOD {
        return Err(ValidationError::settings(format!(
            "Invalid WebP method: {}. Must be between 0 and {}",
            settings.webp_method, MAX_WEBP_METHOD
        ))
        .into());
    }

    if settings.resize_threshold == 0 {
        return Err(ValidationError::settings("Resize threshold cannot be 0").into());
    }

    if settings.resize_threshold > MAX_WEBP_DIMENSION {
        return Err(ValidationError::settings(format!(
            "Invalid resize threshold: {}. WebP images cannot exceed {} pixels per side",
            settings.resize_threshold, MAX_WEBP_DIMENSION
        ))
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{OptimizerError, PathError};
    use tempfile::TempDir;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&OptimizerSettings::default()).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_settings() {
        let quality = OptimizerSettings { webp_quality: 101, ..OptimizerSettings::default() };
        let method = OptimizerSettings { webp_method: 7, ..OptimizerSettings::default() };
        let threshold = OptimizerSettings { resize_threshold: 0, ..OptimizerSettings::default() };
        let oversized = OptimizerSettings {
            resize_threshold: MAX_WEBP_DIMENSION + 1,
            ..OptimizerSettings::default()
        };

        for settings in [quality, method, threshold, oversized] {
            assert!(matches!(
                validate_settings(&settings),
                Err(OptimizerError::Validation(ValidationError::Settings(_)))
            ));
        }
    }

    #[test]
    fn test_threshold_at_webp_limit_is_allowed() {
        let settings = OptimizerSettings {
            resize_threshold: MAX_WEBP_DIMENSION,
            ..OptimizerSettings::default()
        };
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_quality_zero_is_allowed() {
        let settings = OptimizerSettings { webp_quality: 0, ..OptimizerSettings::default() };
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_input_path_checks() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.png");

        assert!(validate_input_path(&missing).unwrap_err().is_not_found());
        assert!(matches!(
            validate_input_path(dir.path()),
            Err(OptimizerError::Validation(ValidationError::Path(PathError::NotFile(_))))
        ));
    }

    #[test]
    fn test_source_dir_checks() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.png");
        std::fs::write(&file, b"x").unwrap();

        assert!(validate_source_dir(dir.path()).is_ok());
        assert!(validate_source_dir(&dir.path().join("gone")).unwrap_err().is_not_found());
        assert!(matches!(
            validate_source_dir(&file),
            Err(OptimizerError::Validation(ValidationError::Path(PathError::NotDirectory(_))))
        ));
    }
}
