//! Error type shared by the library and the `extract_lights` binary.
//!
//! Only input and I/O failures surface here. Degenerate per-region statistics
//! are folded into [`Light::error`](crate::lights::Light) instead, so one bad
//! region never aborts an extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a map or extracting lights.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The file is missing, truncated or otherwise undecodable.
    #[error("Cannot decode {path}: {message}")]
    ImageDecode { path: PathBuf, message: String },

    /// The file extension does not name a floating-point HDR format.
    #[error("Unsupported image format for {0} (expected .hdr or .exr)")]
    UnsupportedFormat(PathBuf),

    /// Width or height is zero.
    #[error("Invalid image dimensions: {0}x{1}")]
    InvalidDimensions(usize, usize),

    /// Fewer than three color channels per pixel.
    #[error("Unsupported channel count: {0} (need at least 3)")]
    UnsupportedChannels(usize),

    /// Pixel buffer length does not match `width * height * channels`.
    #[error("Pixel buffer holds {actual} floats, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Neither the command line nor the config names an input map.
    #[error("No input file given (pass <FILE> or set \"input\" in the config)")]
    MissingInput,

    /// The partitioner produced no regions.
    #[error("Cannot cut {width}x{height} image into light regions")]
    DegeneratePartition { width: usize, height: usize },

    /// A JSON configuration file could not be read or parsed.
    #[error("Invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Writing an output artifact failed.
    #[error("Failed to write {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ExtractError>;
