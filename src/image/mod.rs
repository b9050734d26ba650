//! Image loading, size bounding, and transient output files.
//!
//! Images travel through the pipeline as `image::RgbImage`. Anything the
//! decoder understands is converted to 8-bit RGB on load; alpha and palette
//! information is dropped.

pub mod io;
pub mod size;

pub use size::SizeBounds;

/// Returns `(width, height)` of an RGB image.
pub(crate) fn dims(image: &image::RgbImage) -> (u32, u32) {
    (image.width(), image.height())
}
