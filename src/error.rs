//! # Error Types Module
//!
//! Per-file error categories for the conversion pipeline. Every variant is
//! caught at the single-file boundary in `converter`; none aborts the run.
//! The only fatal condition (missing target directory) is reported through
//! `anyhow` in `main` and never reaches this enum.

/// Errors that can occur while converting a single file.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("ImageMagick error: {0}")]
    Magick(String),

    #[error("Failed to replace output file: {0}")]
    Replace(String),
}
