//! I/O helpers for HDR maps, debug images and JSON.
//!
//! - `load_hdr_image`: read a Radiance `.hdr` or OpenEXR `.exr` file into an
//!   owned f32 buffer.
//! - `save_rgb_u8`: write an 8-bit RGB buffer to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::HdrImage;
use crate::error::{ExtractError, Result};
use image::{DynamicImage, ImageFormat, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an HDR environment map from disk.
///
/// The format comes from the file extension. RGBA32F decodes keep their
/// alpha channel; everything else is converted to RGB32F.
pub fn load_hdr_image(path: &Path) -> Result<HdrImage> {
    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Hdr) | Ok(ImageFormat::OpenExr) => {}
        _ => return Err(ExtractError::UnsupportedFormat(path.to_path_buf())),
    }
    let decoded = image::open(path).map_err(|e| ExtractError::ImageDecode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let (channels, width, height, data) = match decoded {
        DynamicImage::ImageRgba32F(buf) => (4, buf.width(), buf.height(), buf.into_raw()),
        other => {
            let buf = other.into_rgb32f();
            (3, buf.width(), buf.height(), buf.into_raw())
        }
    };
    HdrImage::from_raw(width as usize, height as usize, channels, data)
}

/// Save an 8-bit RGB buffer to a PNG, creating parent directories.
pub fn save_rgb_u8(image: &RgbImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image.save(path).map_err(|e| ExtractError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| ExtractError::Io {
        path: path.to_path_buf(),
        message: format!("serialization failed: {e}"),
    })?;
    fs::write(path, json).map_err(|e| ExtractError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ExtractError::Io {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }
    Ok(())
}
