//! Scalar reference kernel.

use crate::assign::Assignment;
use crate::kernel::{check_inputs, Kernel};
use crate::patch::PatchSet;
use crate::tensor::Tensor;
use crate::trace::{trace_event, trace_span};
use crate::util::StyleSwapResult;

/// Scalar correlate-and-argmax kernel.
pub struct CorrelationScalar;

/// Dot product of `kernel` with the `s x s` content window at `(y, x)`.
///
/// The caller guarantees the window lies inside `content` and that `kernel`
/// holds `channels * s * s` values.
#[inline]
pub(crate) fn correlate_at(content: &Tensor, kernel: &[f32], s: usize, y: usize, x: usize) -> f32 {
    let width = content.width();
    let plane_len = content.plane_len();
    let data = content.as_slice();
    let mut dot = 0.0f32;
    let mut k = 0;
    for c in 0..content.channels() {
        let plane = &data[c * plane_len..(c + 1) * plane_len];
        for dy in 0..s {
            let start = (y + dy) * width + x;
            let window = &plane[start..start + s];
            for (kv, v) in kernel[k..k + s].iter().zip(window) {
                dot += kv * v;
            }
            k += s;
        }
    }
    dot
}

/// Updates `best_idx`/`best_score` for placement row `y`.
///
/// Both slices span one placement row; scores must be initialized to
/// `f32::NEG_INFINITY`.
pub(crate) fn scan_row(
    content: &Tensor,
    patches: &PatchSet,
    y: usize,
    best_idx: &mut [usize],
    best_score: &mut [f32],
) {
    let s = patches.patch_size();
    for (x, (idx, score)) in best_idx.iter_mut().zip(best_score.iter_mut()).enumerate() {
        for (p, kernel) in patches.kernels().chunks_exact(patches.patch_len()).enumerate() {
            let value = correlate_at(content, kernel, s, y, x);
            if value > *score {
                *score = value;
                *idx = p;
            }
        }
    }
}

impl Kernel for CorrelationScalar {
    fn best_matches(content: &Tensor, patches: &PatchSet) -> StyleSwapResult<Assignment> {
        let (grid_height, grid_width) = check_inputs(content, patches)?;
        let _span = trace_span!(
            "correlation_scan",
            grid_height = grid_height,
            grid_width = grid_width,
            patches = patches.len()
        )
        .entered();

        let len = grid_height * grid_width;
        let mut indices = vec![0usize; len];
        let mut scores = vec![f32::NEG_INFINITY; len];
        for (y, (idx_row, score_row)) in indices
            .chunks_exact_mut(grid_width)
            .zip(scores.chunks_exact_mut(grid_width))
            .enumerate()
        {
            scan_row(content, patches, y, idx_row, score_row);
        }

        trace_event!("correlation_done", placements = len);
        Assignment::new(grid_height, grid_width, indices, scores)
    }
}
