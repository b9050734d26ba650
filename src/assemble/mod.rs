//! Overlap-add reconstruction of a feature map from assigned style patches.
//!
//! Each content placement contributes the raw values of its winning style
//! patch to the `s x s` footprint below its top-left corner. Contributions
//! are summed in one pass alongside a per-position coverage count, then
//! divided by that count. This is the stride-1 transposed convolution of a
//! one-hot assignment volume with the raw patches, without building the
//! volume.

use crate::assign::Assignment;
use crate::patch::PatchSet;
use crate::tensor::Tensor;
use crate::trace::{trace_event, trace_span};
use crate::util::{StyleSwapError, StyleSwapResult};

/// Number of patches covering each output position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlapCount {
    height: usize,
    width: usize,
    counts: Vec<u32>,
}

impl OverlapCount {
    /// An all-zero count grid.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            counts: vec![0; height * width],
        }
    }

    /// Coverage of a `grid_height x grid_width` placement grid by `s x s`
    /// patches, i.e. an all-ones patch overlap-added at every placement.
    pub fn for_grid(grid_height: usize, grid_width: usize, patch_size: usize) -> Self {
        let mut out = Self::zeros(
            grid_height + patch_size.saturating_sub(1),
            grid_width + patch_size.saturating_sub(1),
        );
        for row in 0..grid_height {
            for col in 0..grid_width {
                out.add_patch(row, col, patch_size);
            }
        }
        out
    }

    fn add_patch(&mut self, row: usize, col: usize, patch_size: usize) {
        for dy in 0..patch_size {
            let start = (row + dy) * self.width + col;
            for count in &mut self.counts[start..start + patch_size] {
                *count += 1;
            }
        }
    }

    /// Grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Coverage at `(y, x)`.
    pub fn get(&self, y: usize, x: usize) -> Option<u32> {
        if y >= self.height || x >= self.width {
            return None;
        }
        self.counts.get(y * self.width + x).copied()
    }

    /// Row-major coverage values.
    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }
}

/// Overlap-adds the assigned raw style patches and averages by coverage.
///
/// The result has shape `C x (gh + s - 1) x (gw + s - 1)` where `gh x gw` is
/// the assignment grid, i.e. the spatial size of the content feature map.
pub fn reconstruct(assignment: &Assignment, patches: &PatchSet) -> StyleSwapResult<Tensor> {
    let s = patches.patch_size();
    let channels = patches.channels();
    let grid_width = assignment.grid_width();
    let height = assignment.grid_height() + s - 1;
    let width = grid_width + s - 1;
    let _span = trace_span!("reconstruct", channels = channels, height = height, width = width)
        .entered();

    let mut acc = Tensor::zeros(channels, height, width)?;
    let mut counts = OverlapCount::zeros(height, width);
    let plane_len = height * width;
    let out = acc.as_mut_slice();

    for (pos, &idx) in assignment.indices().iter().enumerate() {
        let patch = patches.patch(idx).ok_or(StyleSwapError::InvalidInput(
            "assignment refers to a patch outside the style set",
        ))?;
        let row = pos / grid_width;
        let col = pos % grid_width;
        for (c, patch_plane) in patch.chunks_exact(s * s).enumerate() {
            let plane = &mut out[c * plane_len..(c + 1) * plane_len];
            for (dy, patch_row) in patch_plane.chunks_exact(s).enumerate() {
                let start = (row + dy) * width + col;
                for (dst, v) in plane[start..start + s].iter_mut().zip(patch_row) {
                    *dst += v;
                }
            }
        }
        counts.add_patch(row, col, s);
    }

    normalize_overlap(&mut acc, &counts);
    trace_event!("reconstructed", placements = assignment.len());
    Ok(acc)
}

/// Divides every channel of `acc` by the coverage count.
///
/// # Panics
///
/// Panics if the count grid does not match the tensor's spatial shape, or if
/// any position has zero coverage. Both mean the accumulation and the count
/// disagree on padding, which is a bug in the caller rather than bad input.
pub fn normalize_overlap(acc: &mut Tensor, counts: &OverlapCount) {
    assert_eq!(
        (acc.height(), acc.width()),
        (counts.height(), counts.width()),
        "overlap count grid does not match the accumulated tensor"
    );
    let plane_len = acc.plane_len();
    let width = acc.width();
    for plane in acc.as_mut_slice().chunks_exact_mut(plane_len) {
        for (i, (v, &n)) in plane.iter_mut().zip(counts.as_slice()).enumerate() {
            assert!(
                n != 0,
                "position ({}, {}) is not covered by any patch",
                i / width,
                i % width
            );
            *v /= n as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_overlap, OverlapCount};
    use crate::tensor::Tensor;

    #[test]
    fn coverage_of_small_grid() {
        let counts = OverlapCount::for_grid(2, 2, 3);
        assert_eq!((counts.height(), counts.width()), (4, 4));
        assert_eq!(
            counts.as_slice(),
            &[1, 2, 2, 1, 2, 4, 4, 2, 2, 4, 4, 2, 1, 2, 2, 1]
        );
    }

    #[test]
    #[should_panic(expected = "not covered")]
    fn zero_coverage_panics() {
        let mut acc = Tensor::zeros(1, 2, 2).unwrap();
        normalize_overlap(&mut acc, &OverlapCount::zeros(2, 2));
    }
}
