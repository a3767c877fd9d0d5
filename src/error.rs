//! Error types
//!
//! Every `Display` string is the message shown to the user.

use thiserror::Error;

/// Input rejected before any I/O happens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a URL")]
    EmptyUrl,

    #[error("Please enter a valid URL")]
    InvalidUrl,

    #[error("Please upload a JPG, PNG, SVG, or WebP image")]
    UnsupportedFileType,

    #[error("File size must be less than {}MB", .max_bytes / (1024 * 1024))]
    FileTooLarge { size: u64, max_bytes: u64 },

    #[error("Enter a valid color to generate your Tailwind scale")]
    InvalidColor,
}

/// Pixel palette extraction failure
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to load image")]
    Decode(#[from] image::ImageError),

    #[error("Failed to load image")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract colors from image")]
    NoColors,
}

/// Terminal outcome of the URL resolution chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("No colors could be extracted from this URL. Try a direct image link instead.")]
    NoColorsFound,

    #[error("Could not access this URL. Make sure the URL is correct and publicly accessible.")]
    Unreachable,
}

/// Single network request failure
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),
}

/// Palette persistence failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A palette needs at least one color")]
    EmptyPalette,

    #[error("Failed to serialize palettes: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write palettes: {0}")]
    Io(#[from] std::io::Error),
}
