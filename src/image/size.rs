//! Minimum/maximum dimension bounds applied before and after transfer.
//!
//! Each bound runs as two independent passes: height first, then width
//! against the already-rescaled image. When both dimensions start out of
//! range the second pass rescales the first dimension again, which can drift
//! the aspect ratio by a pixel or two. Scaled sizes are computed as
//! `floor(dim * target / reference)` in integer arithmetic, so the bounded
//! dimension always lands exactly on the threshold.

use crate::util::{StyleSwapError, StyleSwapResult};
use image::imageops::{self, FilterType};
use image::RgbImage;

/// Default lower bound on either image dimension.
pub const DEFAULT_MIN_SIZE: u32 = 228;
/// Default upper bound on either image dimension.
pub const DEFAULT_MAX_SIZE: u32 = 512;

const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Pixel-dimension bounds for pipeline inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeBounds {
    /// Images with a smaller height or width are upscaled.
    pub min_size: u32,
    /// Images with a larger height or width are downscaled.
    pub max_size: u32,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl SizeBounds {
    /// Checks that the bounds are non-zero and ordered.
    pub fn validate(&self) -> StyleSwapResult<()> {
        if self.min_size == 0 {
            return Err(StyleSwapError::InvalidInput("min_size must be positive"));
        }
        if self.min_size > self.max_size {
            return Err(StyleSwapError::InvalidInput(
                "min_size must not exceed max_size",
            ));
        }
        Ok(())
    }

    /// Applies `enforce_minimum` then `enforce_maximum`.
    pub fn apply(&self, image: RgbImage) -> RgbImage {
        enforce_maximum(enforce_minimum(image, self.min_size), self.max_size)
    }

    /// True when an image of this size is upscaled on the way in and must be
    /// restored on the way out.
    pub fn is_undersized(&self, width: u32, height: u32) -> bool {
        width < self.min_size || height < self.min_size
    }
}

fn scale_dim(dim: u32, target: u32, reference: u32) -> u32 {
    let scaled = u64::from(dim) * u64::from(target) / u64::from(reference);
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

/// Dimensions produced by [`enforce_minimum`] for a `width x height` image.
///
/// The scaled side is `floor(side * min_size / short_side)` in exact integer
/// arithmetic, so it can be one pixel larger than a float-ratio resize
/// (`floor(side * (min_size / short_side))`) of the same image.
pub fn minimum_dims(width: u32, height: u32, min_size: u32) -> (u32, u32) {
    let (mut w, mut h) = (width, height);
    if h > 0 && h < min_size {
        w = scale_dim(w, min_size, h);
        h = min_size;
    }
    if w > 0 && w < min_size {
        h = scale_dim(h, min_size, w);
        w = min_size;
    }
    (w, h)
}

/// Dimensions produced by [`enforce_maximum`] for a `width x height` image.
pub fn maximum_dims(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    let (mut w, mut h) = (width, height);
    if h > max_size {
        w = scale_dim(w, max_size, h);
        h = max_size;
    }
    if w > max_size {
        h = scale_dim(h, max_size, w);
        w = max_size;
    }
    (w, h)
}

fn resize_to(image: RgbImage, width: u32, height: u32) -> RgbImage {
    if image.width() == width && image.height() == height {
        return image;
    }
    imageops::resize(&image, width, height, RESIZE_FILTER)
}

/// Upscales an image whose height or width is below `min_size`.
pub fn enforce_minimum(image: RgbImage, min_size: u32) -> RgbImage {
    let (w, h) = minimum_dims(image.width(), image.height(), min_size);
    resize_to(image, w, h)
}

/// Downscales an image whose height or width is above `max_size`.
pub fn enforce_maximum(image: RgbImage, max_size: u32) -> RgbImage {
    let (w, h) = maximum_dims(image.width(), image.height(), max_size);
    resize_to(image, w, h)
}

/// Resizes `result` back to `original` when the original content image was
/// upscaled by the minimum bound; otherwise returns it untouched.
pub fn finalize_size(result: RgbImage, original: (u32, u32), bounds: &SizeBounds) -> RgbImage {
    let (width, height) = original;
    if bounds.is_undersized(width, height) {
        resize_to(result, width, height)
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::{maximum_dims, minimum_dims};

    #[test]
    fn minimum_scales_height_then_width() {
        assert_eq!(minimum_dims(150, 100, 228), (342, 228));
        assert_eq!(minimum_dims(100, 300, 228), (228, 684));
    }

    #[test]
    fn minimum_two_pass_drifts_when_both_small() {
        // Height pass: 70x100 -> 159x228. Width pass: 159x228 -> 228x326.
        // A single joint scale of 228/70 would give 228x325.
        assert_eq!(minimum_dims(70, 100, 228), (228, 326));
    }

    #[test]
    fn maximum_scales_height_then_width() {
        assert_eq!(maximum_dims(600, 1024, 512), (300, 512));
        assert_eq!(maximum_dims(2048, 256, 512), (512, 64));
    }
}
