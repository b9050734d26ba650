//! SIMD-accelerated kernel using the `wide` crate.
//!
//! For one style kernel at a time, eight neighbouring placements of a row are
//! scored together: each kernel element is splatted and multiplied against
//! eight consecutive content values. Accumulation order per lane matches the
//! scalar kernel exactly. Columns that do not fill a full vector fall back to
//! the scalar dot product.

use crate::assign::Assignment;
use crate::kernel::scalar::correlate_at;
use crate::kernel::{check_inputs, Kernel};
use crate::patch::PatchSet;
use crate::tensor::Tensor;
use crate::trace::{trace_event, trace_span};
use crate::util::StyleSwapResult;
use wide::f32x8;

const LANES: usize = 8;

/// Load 8 f32 values into f32x8.
#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

/// SIMD correlate-and-argmax kernel.
pub struct CorrelationSimd;

/// SIMD counterpart of [`crate::kernel::scalar::scan_row`].
pub(crate) fn scan_row(
    content: &Tensor,
    patches: &PatchSet,
    y: usize,
    best_idx: &mut [usize],
    best_score: &mut [f32],
) {
    let s = patches.patch_size();
    let width = content.width();
    let plane_len = content.plane_len();
    let data = content.as_slice();
    let grid_width = best_idx.len();
    let simd_end = grid_width / LANES * LANES;

    for (p, kernel) in patches.kernels().chunks_exact(patches.patch_len()).enumerate() {
        let mut x = 0;
        while x < simd_end {
            let mut acc = f32x8::ZERO;
            let mut k = 0;
            for c in 0..content.channels() {
                for dy in 0..s {
                    let row_start = c * plane_len + (y + dy) * width + x;
                    for dx in 0..s {
                        acc += f32x8::splat(kernel[k]) * load_f32x8(&data[row_start + dx..]);
                        k += 1;
                    }
                }
            }
            let lanes = acc.to_array();
            for (lane, &value) in lanes.iter().enumerate() {
                if value > best_score[x + lane] {
                    best_score[x + lane] = value;
                    best_idx[x + lane] = p;
                }
            }
            x += LANES;
        }

        while x < grid_width {
            let value = correlate_at(content, kernel, s, y, x);
            if value > best_score[x] {
                best_score[x] = value;
                best_idx[x] = p;
            }
            x += 1;
        }
    }
}

impl Kernel for CorrelationSimd {
    fn best_matches(content: &Tensor, patches: &PatchSet) -> StyleSwapResult<Assignment> {
        let (grid_height, grid_width) = check_inputs(content, patches)?;
        let _span = trace_span!(
            "correlation_scan",
            grid_height = grid_height,
            grid_width = grid_width,
            patches = patches.len(),
            simd = true
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
