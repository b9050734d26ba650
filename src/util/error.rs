//! Error types for styleswap.

use thiserror::Error;

/// Result alias for styleswap operations.
pub type StyleSwapResult<T> = std::result::Result<T, StyleSwapError>;

/// Errors that can occur while running the style-swap pipeline.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StyleSwapError {
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// A tensor or image has a zero or overflowing dimension.
    #[error("invalid dimensions: {channels}x{height}x{width}")]
    InvalidDimensions {
        channels: usize,
        height: usize,
        width: usize,
    },
    /// The backing buffer does not hold the advertised shape.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A feature map is smaller than the patch size.
    #[error("patch size {patch} does not fit a {height}x{width} feature map")]
    PatchTooLarge {
        patch: usize,
        height: usize,
        width: usize,
    },
    /// An input image could not be opened or decoded.
    #[error("failed to decode image {path}: {reason}")]
    ImageDecode { path: String, reason: String },
    /// Content and style feature maps disagree on channel depth.
    #[error("feature channel mismatch: content has {content}, style has {style}")]
    ShapeMismatch { content: usize, style: usize },
    /// The feature extractor or inverse network failed.
    #[error("{stage} forward pass failed: {reason}")]
    ExternalModel { stage: &'static str, reason: String },
    /// The transient output file could not be created or written.
    #[error("output resource error: {reason}")]
    Resource { reason: String },
}
