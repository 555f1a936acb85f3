//! Core image processing: decode, resample, encode

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{BatchResizeError, Result};

pub mod formats;

/// Resize engine for single-image operations
///
/// Holds the target width and resample filter for the run. Each call to
/// [`process_file`](Self::process_file) is self-contained: the decoded
/// buffer lives only for the duration of the call, on success and failure
/// alike.
pub struct ResizeEngine {
    target_width: u32,
    filter: image::imageops::FilterType,
}

impl ResizeEngine {
    /// Create an engine from the pipeline configuration
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            target_width: config.target_width,
            filter: config.filter.filter_type(),
        }
    }

    /// Decode `input`, resample it to the target width, and encode it to `output`
    pub async fn process_file(&self, input: &Path, output: &Path) -> Result<ProcessedImage> {
        debug!("Processing file: {:?} -> {:?}", input, output);

        let image = self.load_image(input).await?;

        let (width, height) = (image.width(), image.height());
        if width == 0 {
            return Err(BatchResizeError::decode(
                input.to_path_buf(),
                "image reports zero width",
            ));
        }

        let new_height = target_height(width, height, self.target_width);
        debug!("Target dimensions: {}x{}", self.target_width, new_height);

        let resized = self.resize_image(image, new_height).await?;
        self.save_image(resized, output).await
    }

    /// Load an image from file
    async fn load_image(&self, path: &Path) -> Result<image::DynamicImage> {
        let data = fs::read(path)
            .await
            .map_err(|e| BatchResizeError::decode(path.to_path_buf(), e.to_string()))?;

        let image = tokio::task::spawn_blocking({
            let path = path.to_path_buf();
            move || {
                image::load_from_memory(&data)
                    .map_err(|e| BatchResizeError::decode(path, e.to_string()))
            }
        })
        .await
        .map_err(|e| BatchResizeError::config(format!("Task join error: {}", e)))??;

        debug!("Loaded image: {}x{}", image.width(), image.height());
        Ok(image)
    }

    /// Resample to the exact target dimensions
    async fn resize_image(
        &self,
        image: image::DynamicImage,
        new_height: u32,
    ) -> Result<image::DynamicImage> {
        let target_width = self.target_width;
        let filter = self.filter;

        tokio::task::spawn_blocking(move || image.resize_exact(target_width, new_height, filter))
            .await
            .map_err(|e| BatchResizeError::config(format!("Task join error: {}", e)))
    }

    /// Encode to the format implied by the output path's extension
    async fn save_image(&self, image: image::DynamicImage, output: &Path) -> Result<ProcessedImage> {
        let (width, height) = (image.width(), image.height());

        let format = formats::format_for_path(output).ok_or_else(|| {
            BatchResizeError::encode(output.to_path_buf(), "no codec for output extension")
        })?;

        tokio::task::spawn_blocking({
            let output = output.to_path_buf();
            move || {
                image
                    .save_with_format(&output, format)
                    .map_err(|e| BatchResizeError::encode(output, e.to_string()))
            }
        })
        .await
        .map_err(|e| BatchResizeError::config(format!("Task join error: {}", e)))??;

        debug!("Saved image: {:?} ({}x{})", output, width, height);

        Ok(ProcessedImage {
            path: output.to_path_buf(),
            width,
            height,
        })
    }
}

/// Information about a written output image
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Compute the proportional output height for a fixed target width
///
/// Uses truncating integer division, so `800x600 -> 300x225` but a
/// fractional result always rounds down. Truncation is the historical
/// behavior and is kept deliberately; callers depend on it. Degenerate
/// panoramas that would truncate to zero are clamped to one pixel.
pub fn target_height(width: u32, height: u32, target_width: u32) -> u32 {
    let h = (u64::from(height) * u64::from(target_width) / u64::from(width)) as u32;
    h.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_height_exact_ratio() {
        assert_eq!(target_height(800, 600, 300), 225);
        assert_eq!(target_height(1000, 800, 300), 240);
    }

    #[test]
    fn test_target_height_truncates() {
        // 500 * 300 / 333 = 450.45.. -> 450
        assert_eq!(target_height(333, 500, 300), 450);
        // 999 * 300 / 1000 = 299.7 -> 299
        assert_eq!(target_height(1000, 999, 300), 299);
    }

    #[test]
    fn test_target_height_custom_width() {
        assert_eq!(target_height(800, 600, 400), 300);
        assert_eq!(target_height(800, 600, 160), 120);
    }

    #[test]
    fn test_target_height_clamps_degenerate() {
        // 1 * 300 / 10000 truncates to 0, clamp to a 1px strip
        assert_eq!(target_height(10000, 1, 300), 1);
    }

    #[test]
    fn test_target_height_no_overflow() {
        // Dimensions near u32::MAX must not overflow the intermediate product
        assert_eq!(target_height(u32::MAX, u32::MAX, 300), 300);
    }
}
