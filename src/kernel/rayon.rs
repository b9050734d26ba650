//! Rayon-parallel correlation scan (feature-gated).
//!
//! Placement rows are independent, so each worker scans whole rows with the
//! same row routine the sequential kernels use.

use crate::assign::Assignment;
use crate::kernel::check_inputs;
use crate::patch::PatchSet;
use crate::tensor::Tensor;
use crate::trace::{trace_event, trace_span};
use crate::util::StyleSwapResult;
use rayon::prelude::*;

#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::scan_row;
#[cfg(feature = "simd")]
use crate::kernel::simd::scan_row;

/// Row-parallel correlate-and-argmax scan.
pub fn best_matches_par(content: &Tensor, patches: &PatchSet) -> StyleSwapResult<Assignment> {
    let (grid_height, grid_width) = check_inputs(content, patches)?;
    let _span = trace_span!(
        "correlation_scan",
        grid_height = grid_height,
        grid_width = grid_width,
        patches = patches.len(),
        parallel = true
    )
    .entered();

    let len = grid_height * grid_width;
    let mut indices = vec![0usize; len];
    let mut scores = vec![f32::NEG_INFINITY; len];
    indices
        .par_chunks_mut(grid_width)
        .zip(scores.par_chunks_mut(grid_width))
        .enumerate()
        .for_each(|(y, (idx_row, score_row))| {
            scan_row(content, patches, y, idx_row, score_row);
        });

    trace_event!("correlation_done", placements = len);
    Assignment::new(grid_height, grid_width, indices, scores)
}
