//! Per-position best-match assignments and the dense correlation volume.
//!
//! The pipeline never builds a [`CorrelationVolume`]; the fused kernels in
//! [`crate::kernel`] compute the argmax on the fly. The volume exists for
//! inspection and for checking the fused kernels against a literal
//! convolution-then-argmax.

use crate::kernel::{check_inputs, scalar::correlate_at};
use crate::patch::PatchSet;
use crate::tensor::Tensor;
use crate::util::{StyleSwapError, StyleSwapResult};

/// Best style patch per content placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    grid_height: usize,
    grid_width: usize,
    indices: Vec<usize>,
    scores: Vec<f32>,
}

impl Assignment {
    /// Builds an assignment from row-major index and score buffers.
    ///
    /// Grids with no placements are rejected.
    pub fn new(
        grid_height: usize,
        grid_width: usize,
        indices: Vec<usize>,
        scores: Vec<f32>,
    ) -> StyleSwapResult<Self> {
        if grid_height == 0 || grid_width == 0 {
            return Err(StyleSwapError::InvalidDimensions {
                channels: 1,
                height: grid_height,
                width: grid_width,
            });
        }
        let needed = grid_height
            .checked_mul(grid_width)
            .ok_or(StyleSwapError::InvalidInput("assignment grid overflows"))?;
        if indices.len() != needed || scores.len() != needed {
            return Err(StyleSwapError::BufferTooSmall {
                needed,
                got: indices.len().min(scores.len()),
            });
        }
        Ok(Self {
            grid_height,
            grid_width,
            indices,
            scores,
        })
    }

    /// Number of placement rows.
    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// Number of placement columns.
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True for an empty grid.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Winning patch indices in row-major placement order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Winning correlation scores in row-major placement order.
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Winning patch index at placement `(row, col)`.
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.grid_height || col >= self.grid_width {
            return None;
        }
        self.indices.get(row * self.grid_width + col).copied()
    }

    /// Winning score at placement `(row, col)`.
    pub fn score_at(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.grid_height || col >= self.grid_width {
            return None;
        }
        self.scores.get(row * self.grid_width + col).copied()
    }
}

/// Dense `num_patches x grid_height x grid_width` correlation scores.
#[derive(Clone, Debug)]
pub struct CorrelationVolume {
    num_patches: usize,
    grid_height: usize,
    grid_width: usize,
    data: Vec<f32>,
}

impl CorrelationVolume {
    /// Number of patch slices.
    pub fn num_patches(&self) -> usize {
        self.num_patches
    }

    /// Number of placement rows.
    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// Number of placement columns.
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    /// Score of patch `p` at placement `(row, col)`.
    pub fn get(&self, p: usize, row: usize, col: usize) -> Option<f32> {
        if p >= self.num_patches || row >= self.grid_height || col >= self.grid_width {
            return None;
        }
        let plane = self.grid_height * self.grid_width;
        self.data
            .get(p * plane + row * self.grid_width + col)
            .copied()
    }
}

/// Correlates every content placement with every normalized style patch.
///
/// Equivalent to an unpadded stride-1 convolution of `content` with the
/// patch kernels.
pub fn compute_correlation(content: &Tensor, patches: &PatchSet) -> StyleSwapResult<CorrelationVolume> {
    let (grid_height, grid_width) = check_inputs(content, patches)?;
    let s = patches.patch_size();
    let mut data = Vec::with_capacity(patches.len() * grid_height * grid_width);
    for kernel in patches.kernels().chunks_exact(patches.patch_len()) {
        for y in 0..grid_height {
            for x in 0..grid_width {
                data.push(correlate_at(content, kernel, s, y, x));
            }
        }
    }
    Ok(CorrelationVolume {
        num_patches: patches.len(),
        grid_height,
        grid_width,
        data,
    })
}

/// Argmax over the patch axis; ties keep the lowest patch index.
pub fn select_best_match(volume: &CorrelationVolume) -> StyleSwapResult<Assignment> {
    let plane = volume.grid_height * volume.grid_width;
    let mut indices = vec![0usize; plane];
    let mut scores = vec![f32::NEG_INFINITY; plane];
    for (p, slice) in volume.data.chunks_exact(plane).enumerate() {
        for (pos, &score) in slice.iter().enumerate() {
            if score > scores[pos] {
                scores[pos] = score;
                indices[pos] = p;
            }
        }
    }
    Assignment::new(volume.grid_height, volume.grid_width, indices, scores)
}
