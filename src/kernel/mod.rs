//! Correlation kernel implementations.
//!
//! Every kernel computes, for each content placement, the style patch with
//! the largest dot product against its normalized kernel. Scores are summed
//! in the same element order (channel, row, column) by all implementations,
//! so scalar, SIMD, and parallel scans agree bit for bit and resolve ties
//! identically: the lowest patch index wins.

use crate::assign::Assignment;
use crate::patch::{grid_dims, PatchSet};
use crate::tensor::Tensor;
use crate::util::{StyleSwapError, StyleSwapResult};

/// Kernel trait for the fused correlate-and-argmax scan.
pub trait Kernel {
    /// Scans every content placement and returns the best style patch for each.
    fn best_matches(content: &Tensor, patches: &PatchSet) -> StyleSwapResult<Assignment>;
}

/// Validates content against the patch set and returns the placement grid.
pub(crate) fn check_inputs(content: &Tensor, patches: &PatchSet) -> StyleSwapResult<(usize, usize)> {
    if content.channels() != patches.channels() {
        return Err(StyleSwapError::ShapeMismatch {
            content: content.channels(),
            style: patches.channels(),
        });
    }
    if patches.is_empty() {
        return Err(StyleSwapError::InvalidInput("style patch set is empty"));
    }
    grid_dims(content.height(), content.width(), patches.patch_size())
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;
