//! Pooled-pixel stand-in networks.

use crate::model::{FeatureExtractor, InverseNetwork};
use crate::tensor::{FeatureMap, Tensor};
use crate::util::{StyleSwapError, StyleSwapResult};

/// Box-pooled pixels as features, nearest-neighbour upsampling as inverse.
///
/// With `factor == 1` both directions are the identity and the pipeline
/// performs patch swapping directly in normalized pixel space. Larger factors
/// trade detail for speed: each feature cell averages a `factor x factor`
/// pixel block, and trailing rows or columns that do not fill a block are
/// dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PooledPixels {
    factor: usize,
}

impl PooledPixels {
    /// Creates a pooled-pixel network with the given block size.
    pub fn new(factor: usize) -> StyleSwapResult<Self> {
        if factor == 0 {
            return Err(StyleSwapError::InvalidInput("pool factor must be positive"));
        }
        Ok(Self { factor })
    }

    /// Block size in pixels.
    pub fn factor(&self) -> usize {
        self.factor
    }
}

impl FeatureExtractor for PooledPixels {
    type Error = StyleSwapError;

    fn forward(&self, input: &Tensor) -> Result<FeatureMap, Self::Error> {
        let f = self.factor;
        let (channels, height, width) = input.shape();
        let out_h = height / f;
        let out_w = width / f;
        if out_h == 0 || out_w == 0 {
            return Err(StyleSwapError::InvalidDimensions {
                channels,
                height: out_h,
                width: out_w,
            });
        }
        let src = input.as_slice();
        let src_plane = input.plane_len();
        let inv_area = 1.0 / (f * f) as f32;
        let mut out = Vec::with_capacity(channels * out_h * out_w);
        for c in 0..channels {
            let plane = &src[c * src_plane..(c + 1) * src_plane];
            for oy in 0..out_h {
                for ox in 0..out_w {
                    let mut sum = 0.0f32;
                    for dy in 0..f {
                        let start = (oy * f + dy) * width + ox * f;
                        sum += plane[start..start + f].iter().sum::<f32>();
                    }
                    out.push(sum * inv_area);
                }
            }
        }
        Tensor::new(out, channels, out_h, out_w)
    }
}

impl InverseNetwork for PooledPixels {
    type Error = StyleSwapError;

    fn forward(&self, features: &FeatureMap) -> Result<Tensor, Self::Error> {
        let f = self.factor;
        let (channels, height, width) = features.shape();
        let out_w = width * f;
        let mut out = Vec::with_capacity(channels * height * f * out_w);
        for c in 0..channels {
            for y in 0..height {
                let row = features
                    .row(c, y)
                    .ok_or(StyleSwapError::InvalidInput("feature row out of range"))?;
                let mut up = Vec::with_capacity(out_w);
                for &v in row {
                    up.extend(std::iter::repeat(v).take(f));
                }
                for _ in 0..f {
                    out.extend_from_slice(&up);
                }
            }
        }
        Tensor::new(out, channels, height * f, out_w)
    }
}

#[cfg(test)]
mod tests {
    use super::PooledPixels;
    use crate::model::{FeatureExtractor, InverseNetwork};
    use crate::tensor::Tensor;

    #[test]
    fn pooling_averages_blocks_and_drops_remainder() {
        let data: Vec<f32> = (0..15).map(|v| v as f32).collect();
        let input = Tensor::new(data, 1, 3, 5).unwrap();
        let net = PooledPixels::new(2).unwrap();
        let out = FeatureExtractor::forward(&net, &input).unwrap();
        assert_eq!(out.shape(), (1, 1, 2));
        // Blocks {0,1,5,6} and {2,3,7,8}.
        assert_eq!(out.as_slice(), &[3.0, 5.0]);
    }

    #[test]
    fn upsampling_repeats_cells() {
        let input = Tensor::new(vec![1.0, 2.0], 1, 1, 2).unwrap();
        let net = PooledPixels::new(2).unwrap();
        let out = InverseNetwork::forward(&net, &input).unwrap();
        assert_eq!(out.shape(), (1, 2, 4));
        assert_eq!(out.as_slice(), &[1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn factor_one_is_identity_both_ways() {
        let data: Vec<f32> = (0..12).map(|v| v as f32 * 0.5).collect();
        let input = Tensor::new(data, 3, 2, 2).unwrap();
        let net = PooledPixels::new(1).unwrap();
        let features = FeatureExtractor::forward(&net, &input).unwrap();
        assert_eq!(features, input);
        let back = InverseNetwork::forward(&net, &features).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn zero_factor_is_rejected() {
        assert!(PooledPixels::new(0).is_err());
    }
}
