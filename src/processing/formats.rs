//! Image format detection and handling

use std::path::Path;

/// Extensions processed by default (matched case-insensitively)
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff"];

/// Check if a file extension is supported by the default set
pub fn is_default_extension(extension: &str) -> bool {
    DEFAULT_EXTENSIONS
        .iter()
        .any(|&fmt| fmt.eq_ignore_ascii_case(extension))
}

/// Get the lowercase extension of a path, if any
pub fn path_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Detect the output format implied by a path's extension
pub fn format_for_path(path: &Path) -> Option<image::ImageFormat> {
    match path_extension(path)?.as_str() {
        "jpg" | "jpeg" => Some(image::ImageFormat::Jpeg),
        "png" => Some(image::ImageFormat::Png),
        "gif" => Some(image::ImageFormat::Gif),
        "bmp" => Some(image::ImageFormat::Bmp),
        "webp" => Some(image::ImageFormat::WebP),
        "tiff" | "tif" => Some(image::ImageFormat::Tiff),
        _ => None,
    }
}
