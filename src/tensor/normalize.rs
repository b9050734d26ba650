//! Per-channel pixel normalization around the feature extractor.

use crate::tensor::Tensor;
use crate::util::{StyleSwapError, StyleSwapResult};
use image::RgbImage;

/// Per-channel mean and standard deviation applied to pixels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelNormalization {
    /// Channel means subtracted after scaling to `[0, 1]`.
    pub mean: [f32; 3],
    /// Channel standard deviations divided out after mean subtraction.
    pub std: [f32; 3],
}

impl Default for PixelNormalization {
    /// ImageNet statistics, matching the usual VGG-family extractors.
    fn default() -> Self {
        Self {
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }
}

impl PixelNormalization {
    /// Converts an RGB image into a normalized `3 x H x W` tensor.
    pub fn normalize(&self, image: &RgbImage) -> StyleSwapResult<Tensor> {
        if self.std.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(StyleSwapError::InvalidInput(
                "normalization std must be finite and non-zero",
            ));
        }
        let width = image.width() as usize;
        let height = image.height() as usize;
        let mut out = Tensor::zeros(3, height, width)?;
        let plane_len = out.plane_len();
        let data = out.as_mut_slice();
        for (idx, px) in image.pixels().enumerate() {
            for c in 0..3 {
                let v = f32::from(px.0[c]) / 255.0;
                data[c * plane_len + idx] = (v - self.mean[c]) / self.std[c];
            }
        }
        Ok(out)
    }

    /// Undoes [`normalize`](Self::normalize) and clamps to `[0, 1]`.
    pub fn denormalize(&self, tensor: &Tensor) -> StyleSwapResult<Tensor> {
        if tensor.channels() != 3 {
            return Err(StyleSwapError::InvalidInput(
                "denormalization expects a 3-channel tensor",
            ));
        }
        let mut out = tensor.clone();
        let plane_len = out.plane_len();
        for (c, plane) in out.as_mut_slice().chunks_exact_mut(plane_len).enumerate() {
            for v in plane {
                *v = (*v * self.std[c] + self.mean[c]).clamp(0.0, 1.0);
            }
        }
        Ok(out)
    }
}
