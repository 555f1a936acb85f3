//! Configuration management for BatchResize

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BatchResizeError, Result};
use crate::processing::formats::DEFAULT_EXTENSIONS;

/// Main configuration for a pipeline run
///
/// All fields have documented defaults matching the classic behavior:
/// resize every supported image in the input folder to a 300 pixel width
/// and write it next to its siblings as `{stem}_resized{ext}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Width every output image is normalized to (pixels)
    pub target_width: u32,

    /// Suffix inserted between the filename stem and its extension
    pub suffix: String,

    /// Extensions eligible for processing (matched case-insensitively)
    pub extensions: Vec<String>,

    /// Resample filter used for the resize
    pub filter: ResizeFilter,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_width: 300,
            suffix: "_resized".to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            filter: ResizeFilter::Lanczos3,
            logging: LoggingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            BatchResizeError::config(format!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let config: Self = match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => {
                return Err(BatchResizeError::config(
                    "Unsupported config file format. Use .toml or .yaml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML or YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let content = match extension.to_lowercase().as_str() {
            "toml" => toml::to_string_pretty(self)
                .map_err(|e| BatchResizeError::config(format!("TOML serialization failed: {}", e)))?,
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            _ => {
                return Err(BatchResizeError::config(
                    "Unsupported config file format. Use .toml or .yaml",
                ))
            }
        };

        std::fs::write(&path, content).map_err(|e| {
            BatchResizeError::config(format!(
                "Failed to write config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.target_width == 0 || self.target_width > 32768 {
            return Err(BatchResizeError::config(format!(
                "Target width must be between 1-32768, got {}",
                self.target_width
            )));
        }

        if self
            .suffix
            .contains(['/', '\\', ':', '*', '?', '"', '<', '>', '|'])
        {
            return Err(BatchResizeError::config(
                "Suffix contains invalid filename characters",
            ));
        }

        if self.extensions.is_empty() {
            return Err(BatchResizeError::config(
                "At least one supported extension is required",
            ));
        }

        Ok(())
    }

    /// Check whether a file extension is eligible for processing
    pub fn is_supported_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

/// Resample filters, mapped onto the image crate's filter types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    /// Get the corresponding image crate filter
    pub fn filter_type(self) -> image::imageops::FilterType {
        match self {
            Self::Nearest => image::imageops::FilterType::Nearest,
            Self::Triangle => image::imageops::FilterType::Triangle,
            Self::CatmullRom => image::imageops::FilterType::CatmullRom,
            Self::Gaussian => image::imageops::FilterType::Gaussian,
            Self::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
