//! Styleswap is a CPU patch-swap style transfer engine.
//!
//! Given feature maps of a content and a style image, every content patch is
//! replaced by the style patch with the highest normalized cross-correlation,
//! and the swapped patches are overlap-added into a new feature map. Pixel
//! normalization, size bounding, and global color matching around the two
//! external networks are included; the networks themselves plug in through
//! the [`FeatureExtractor`] and [`InverseNetwork`] traits. Parallel and SIMD
//! correlation scans are available via the `rayon` and `simd` features.

pub mod assemble;
pub mod assign;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod model;
pub mod patch;
pub mod postprocess;
pub mod tensor;
mod trace;
pub mod transfer;
pub mod util;

pub use crate::image::io::{load_rgb_image, TransientImage};
pub use crate::image::SizeBounds;
pub use assign::Assignment;
pub use model::{FeatureExtractor, InverseNetwork, PooledPixels};
pub use patch::{PatchSet, PATCH_SIZE};
pub use tensor::normalize::PixelNormalization;
pub use tensor::{FeatureMap, Tensor};
pub use transfer::{style_swap, StyleTransfer, TransferConfig};
pub use util::{StyleSwapError, StyleSwapResult};
