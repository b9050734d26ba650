//! Style patch extraction and kernel normalization.
//!
//! A `PatchSet` holds every unit-stride `s x s` window of a feature map in
//! canonical row-major order: index `i` is the window whose top-left corner
//! is `(i / grid_width, i % grid_width)`. Matching and reconstruction both
//! rely on this mapping, so nothing outside this module enumerates patches.
//!
//! Each patch is stored twice: the raw values, used as reconstruction
//! material, and an L2-normalized copy used as a correlation kernel. Within a
//! patch, elements are laid out channel-major, then row, then column.

use crate::tensor::Tensor;
use crate::trace::{trace_event, trace_span};
use crate::util::stats::l2_norm;
use crate::util::{StyleSwapError, StyleSwapResult};

/// Side length of the square patches used by the pipeline.
pub const PATCH_SIZE: usize = 3;

/// Lower bound on a patch norm during normalization.
const NORM_EPS: f32 = 1e-12;

/// Number of patch placements `(rows, cols)` for an `height x width` map.
pub fn grid_dims(height: usize, width: usize, patch_size: usize) -> StyleSwapResult<(usize, usize)> {
    if patch_size == 0 {
        return Err(StyleSwapError::InvalidInput("patch size must be positive"));
    }
    if height < patch_size || width < patch_size {
        return Err(StyleSwapError::PatchTooLarge {
            patch: patch_size,
            height,
            width,
        });
    }
    Ok((height - patch_size + 1, width - patch_size + 1))
}

/// Ordered set of overlapping style patches with their normalized kernels.
#[derive(Clone, Debug)]
pub struct PatchSet {
    patch_size: usize,
    channels: usize,
    grid_height: usize,
    grid_width: usize,
    raw: Vec<f32>,
    kernels: Vec<f32>,
}

impl PatchSet {
    /// Extracts all unit-stride patches of `features`.
    pub fn extract(features: &Tensor, patch_size: usize) -> StyleSwapResult<Self> {
        let (channels, height, width) = features.shape();
        let (grid_height, grid_width) = grid_dims(height, width, patch_size)?;
        let _span = trace_span!(
            "extract_patches",
            channels = channels,
            grid_height = grid_height,
            grid_width = grid_width
        )
        .entered();

        let patch_len = channels * patch_size * patch_size;
        let count = grid_height * grid_width;
        let src = features.as_slice();
        let plane_len = features.plane_len();

        let mut raw = Vec::with_capacity(count * patch_len);
        for a in 0..grid_height {
            for b in 0..grid_width {
                for c in 0..channels {
                    let plane = &src[c * plane_len..(c + 1) * plane_len];
                    for dy in 0..patch_size {
                        let start = (a + dy) * width + b;
                        raw.extend_from_slice(&plane[start..start + patch_size]);
                    }
                }
            }
        }

        let mut kernels = raw.clone();
        for kernel in kernels.chunks_exact_mut(patch_len) {
            let inv = 1.0 / l2_norm(kernel).max(NORM_EPS);
            for v in kernel.iter_mut() {
                *v *= inv;
            }
        }

        trace_event!("patches_extracted", count = count);
        Ok(Self {
            patch_size,
            channels,
            grid_height,
            grid_width,
            raw,
            kernels,
        })
    }

    /// Number of patches.
    pub fn len(&self) -> usize {
        self.grid_height * self.grid_width
    }

    /// True if the set holds no patches (never the case after `extract`).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Patch side length.
    pub fn patch_size(&self) -> usize {
        self.patch_size
    }

    /// Channel depth of each patch.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of elements in one patch (`channels * s * s`).
    pub fn patch_len(&self) -> usize {
        self.channels * self.patch_size * self.patch_size
    }

    /// Number of patch rows in the source feature map.
    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// Number of patch columns in the source feature map.
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    /// Raw (unnormalized) values of patch `idx`.
    pub fn patch(&self, idx: usize) -> Option<&[f32]> {
        let len = self.patch_len();
        let start = idx.checked_mul(len)?;
        self.raw.get(start..start.checked_add(len)?)
    }

    /// Unit-norm kernel of patch `idx`.
    pub fn kernel(&self, idx: usize) -> Option<&[f32]> {
        let len = self.patch_len();
        let start = idx.checked_mul(len)?;
        self.kernels.get(start..start.checked_add(len)?)
    }

    /// All raw patches back to back.
    pub fn raw_patches(&self) -> &[f32] {
        &self.raw
    }

    /// All normalized kernels back to back.
    pub fn kernels(&self) -> &[f32] {
        &self.kernels
    }

    /// Top-left `(row, col)` of patch `idx`.
    pub fn coord(&self, idx: usize) -> Option<(usize, usize)> {
        if idx >= self.len() {
            return None;
        }
        Some((idx / self.grid_width, idx % self.grid_width))
    }

    /// Index of the patch whose top-left corner is `(row, col)`.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.grid_height || col >= self.grid_width {
            return None;
        }
        Some(row * self.grid_width + col)
    }
}

#[cfg(test)]
mod tests {
    use super::{grid_dims, PatchSet};
    use crate::tensor::Tensor;
    use crate::util::StyleSwapError;

    #[test]
    fn grid_dims_rejects_small_maps() {
        assert_eq!(grid_dims(5, 4, 3).unwrap(), (3, 2));
        assert_eq!(
            grid_dims(2, 4, 3).unwrap_err(),
            StyleSwapError::PatchTooLarge {
                patch: 3,
                height: 2,
                width: 4
            }
        );
    }

    #[test]
    fn zero_patch_normalizes_to_zero_kernel() {
        let t = Tensor::zeros(2, 3, 3).unwrap();
        let set = PatchSet::extract(&t, 3).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.kernel(0).unwrap().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn coord_and_index_are_inverse() {
        let t = Tensor::zeros(1, 6, 5).unwrap();
        let set = PatchSet::extract(&t, 3).unwrap();
        for idx in 0..set.len() {
            let (row, col) = set.coord(idx).unwrap();
            assert_eq!(set.index_of(row, col), Some(idx));
        }
        assert!(set.coord(set.len()).is_none());
    }
}
