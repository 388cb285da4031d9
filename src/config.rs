use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::selection::SelectionConfig;

/// Startup overrides for the selection limits, read once from an optional
/// JSON file in the working directory. An absent `max_size_kb` means no
/// upper bound.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub allowed_mime_types: Vec<String>,
    pub max_file_count: usize,
    pub min_size_kb: f64,
    pub max_size_kb: Option<f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let selection = SelectionConfig::default();
        Self {
            allowed_mime_types: selection.allowed_mime_types,
            max_file_count: selection.max_file_count,
            min_size_kb: selection.min_size_kb,
            max_size_kb: None,
        }
    }
}

impl AppConfig {
    pub const FILE_NAME: &'static str = "image_uploader.json";

    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn selection(&self) -> SelectionConfig {
        SelectionConfig {
            allowed_mime_types: self.allowed_mime_types.clone(),
            max_file_count: self.max_file_count,
            min_size_kb: self.min_size_kb,
            max_size_kb: self.max_size_kb.unwrap_or(f64::INFINITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn defaults_match_the_widget_defaults() {
        let selection = AppConfig::default().selection();
        assert_eq!(selection.max_file_count, 50);
        assert_eq!(selection.min_size_kb, 0.0);
        assert_eq!(selection.max_size_kb, f64::INFINITY);
        assert_eq!(selection.allowed_mime_types.len(), 5);
        assert!(selection.allowed_mime_types.iter().any(|m| m == "image/png"));
    }

    #[test]
    fn missing_file_means_no_overrides() {
        let dir = TempDir::new("image-uploader").unwrap();
        assert!(AppConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let dir = TempDir::new("image-uploader").unwrap();
        fs::write(
            dir.path().join(AppConfig::FILE_NAME),
            r#"{ "max_file_count": 2, "max_size_kb": 100.0 }"#,
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).unwrap().unwrap();
        let selection = config.selection();
        assert_eq!(selection.max_file_count, 2);
        assert_eq!(selection.max_size_kb, 100.0);
        // untouched fields keep their defaults
        assert_eq!(selection.min_size_kb, 0.0);
        assert_eq!(selection.allowed_mime_types.len(), 5);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new("image-uploader").unwrap();
        fs::write(dir.path().join(AppConfig::FILE_NAME), "not json").unwrap();
        assert!(AppConfig::load(dir.path()).is_err());
    }
}
