/*!
 * Common test utilities for the panel-translate test suite
 */

use anyhow::Result;
use image::{DynamicImage, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use panel_translate::text_block::TextBlock;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Small page image filled with one color
pub fn solid_page(color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb(color)))
}

/// Color of the top-left pixel, used to tell pages apart
pub fn page_color(image: &DynamicImage) -> [u8; 3] {
    image.to_rgb8().get_pixel(0, 0).0
}

/// Untranslated blocks with the given texts
pub fn blocks(texts: &[&str]) -> Vec<TextBlock> {
    texts.iter().map(|text| TextBlock::new(*text)).collect()
}
