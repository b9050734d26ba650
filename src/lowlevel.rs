//! Low-level building blocks for custom pipelines.
//!
//! These expose the individual stages behind `StyleTransfer`: patch
//! extraction, correlation kernels, the dense correlation volume, overlap-add
//! reconstruction, and pixel post-processing. Most users should prefer
//! `StyleTransfer` or the `style_swap` function.

pub use crate::assemble::{normalize_overlap, reconstruct, OverlapCount};
pub use crate::assign::{compute_correlation, select_best_match, Assignment, CorrelationVolume};
pub use crate::image::size::{
    enforce_maximum, enforce_minimum, finalize_size, maximum_dims, minimum_dims,
};
pub use crate::kernel::scalar::CorrelationScalar;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::CorrelationSimd;
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::best_matches_par;
pub use crate::kernel::Kernel;
pub use crate::patch::{grid_dims, PatchSet, PATCH_SIZE};
pub use crate::postprocess::{color_match, to_image};
pub use crate::transfer::find_matches;
