//! Default save locations and raw image writing.

use std::path::{Path, PathBuf};

use crate::error::GenError;

/// Default filename for a save: `generated_image_<timestamp>.png`.
#[must_use]
pub fn default_filename() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    format!("generated_image_{timestamp}.png")
}

/// Directory the save dialog opens in: Downloads, else home, else `.`.
#[must_use]
pub fn default_save_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Write image bytes verbatim, overwriting any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_bytes(path: &Path, data: &[u8]) -> Result<(), GenError> {
    std::fs::write(path, data).map_err(GenError::Io)
}
