//! Run configuration: conversion settings plus the content roots to visit.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;
use crate::core::OptimizerSettings;
use crate::utils::{validate_settings, OptimizerError, OptimizerResult, ValidationError};

/// Regional subdirectories processed after the project root.
pub const DEFAULT_CONTENT_ROOTS: [&str; 8] = [
    "Novosib1",
    "SPB",
    "Архангельск",
    "Дальний восток",
    "Кировская",
    "Нижний Новгород",
    "Самара",
    "ЯНАО",
];

/// Everything the driver needs for one run.
///
/// Loaded from a JSON file; missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunConfig {
    /// Conversion settings
    #[serde(flatten)]
    pub settings: OptimizerSettings,
    /// Subdirectory names (relative to the project directory) to process
    pub content_roots: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            settings: OptimizerSettings::default(),
            content_roots: DEFAULT_CONTENT_ROOTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RunConfig {
    /// Reads and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> OptimizerResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            OptimizerError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&raw).map_err(|e| match e {
            OptimizerError::Config(msg) => {
                OptimizerError::config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parses and validates a JSON config string.
    pub fn from_json(raw: &str) -> OptimizerResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| OptimizerError::config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> OptimizerResult<()> {
        validate_settings(&self.settings)?;

        if let Some(root) = self.content_roots.iter().find(|r| !is_relative_name(r)) {
            return Err(ValidationError::settings(format!(
                "Content root must be a relative directory name: {:?}",
                root
            ))
            .into());
        }

        Ok(())
    }
}

// Content roots are joined onto the project directory, so absolute paths and
// parent components would escape it.
fn is_relative_name(root: &str) -> bool {
    let path = Path::new(root);
    !root.is_empty()
        && path
            .components()
            .all(|c| matches!(c, std::path::Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.settings, OptimizerSettings::default());
        assert_eq!(config.content_roots.len(), 8);
        assert_eq!(config.content_roots[0], "Novosib1");
        assert_eq!(config.content_roots[7], "ЯНАО");
    }

    #[test]
    fn test_from_json_overrides_and_defaults() {
        let config = RunConfig::from_json(
            r#"{ "webpQuality": 75, "resizeThreshold": 1200, "contentRoots": ["north", "south/east"] }"#,
        )
        .unwrap();

        assert_eq!(config.settings.webp_quality, 75);
        assert_eq!(config.settings.resize_threshold, 1200);
        assert_eq!(config.settings.webp_method, 6);
        assert_eq!(config.content_roots, vec!["north", "south/east"]);
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(RunConfig::from_json("{}").unwrap(), RunConfig::default());
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let err = RunConfig::from_json(r#"{ "webpMethod": 9 }"#).unwrap_err();
        assert!(matches!(err, OptimizerError::Validation(ValidationError::Settings(_))));
    }

    #[test]
    fn test_rejects_escaping_content_roots() {
        for root in [r#""../outside""#, r#""/abs""#, r#""""#] {
            let raw = format!(r#"{{ "contentRoots": [{}] }}"#, root);
            assert!(RunConfig::from_json(&raw).is_err(), "accepted {}", root);
        }
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            RunConfig::from_json("{ not json"),
            Err(OptimizerError::Config(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = RunConfig::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, OptimizerError::Config(_)));
    }
}
