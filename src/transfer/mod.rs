//! End-to-end style transfer around the two external networks.
//!
//! `StyleTransfer` owns an extractor, an inverse network, and a
//! `TransferConfig`. Each call is independent: nothing mutable survives
//! between calls, so a shared instance can serve concurrent requests when
//! both networks are `Sync`.

use crate::assemble::reconstruct;
use crate::assign::Assignment;
use crate::image::io::{load_rgb_image, TransientImage};
use crate::image::size::finalize_size;
use crate::image::{dims, SizeBounds};
use crate::kernel::Kernel;
use crate::model::{FeatureExtractor, InverseNetwork};
use crate::patch::{PatchSet, PATCH_SIZE};
use crate::postprocess::{color_match, to_image};
use crate::tensor::normalize::PixelNormalization;
use crate::tensor::{FeatureMap, Tensor};
use crate::trace::{trace_event, trace_span};
use crate::util::{StyleSwapError, StyleSwapResult};
use image::RgbImage;
use std::path::Path;

#[cfg(feature = "rayon")]
use crate::kernel::rayon::best_matches_par;
#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::CorrelationScalar as Correlation;
#[cfg(feature = "simd")]
use crate::kernel::simd::CorrelationSimd as Correlation;

/// Configuration for a style transfer run.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferConfig {
    /// Input dimension bounds.
    pub bounds: SizeBounds,
    /// Pixel statistics used around the extractor and inverse network.
    pub normalization: PixelNormalization,
    /// Scan placement rows in parallel (requires the `rayon` feature;
    /// ignored otherwise).
    pub parallel: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            bounds: SizeBounds::default(),
            normalization: PixelNormalization::default(),
            parallel: false,
        }
    }
}

/// Finds the best style patch for every content placement.
pub fn find_matches(
    content: &FeatureMap,
    patches: &PatchSet,
    parallel: bool,
) -> StyleSwapResult<Assignment> {
    #[cfg(feature = "rayon")]
    if parallel {
        return best_matches_par(content, patches);
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel;
    <Correlation as Kernel>::best_matches(content, patches)
}

/// Replaces every content patch with its best-correlated style patch.
pub fn style_swap(
    content: &FeatureMap,
    style: &FeatureMap,
    parallel: bool,
) -> StyleSwapResult<FeatureMap> {
    if content.channels() != style.channels() {
        return Err(StyleSwapError::ShapeMismatch {
            content: content.channels(),
            style: style.channels(),
        });
    }
    let patches = PatchSet::extract(style, PATCH_SIZE)?;
    let assignment = find_matches(content, &patches, parallel)?;
    reconstruct(&assignment, &patches)
}

/// Patch-swap style transfer pipeline.
pub struct StyleTransfer<E, I> {
    extractor: E,
    inverse: I,
    cfg: TransferConfig,
}

impl<E, I> StyleTransfer<E, I>
where
    E: FeatureExtractor,
    I: InverseNetwork,
{
    /// Creates a pipeline with the default configuration.
    pub fn new(extractor: E, inverse: I) -> Self {
        Self {
            extractor,
            inverse,
            cfg: TransferConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: TransferConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &TransferConfig {
        &self.cfg
    }

    /// Stylizes the image at `content_path` with the image at `style_path`.
    ///
    /// The result is written as PNG to a temporary file that is deleted when
    /// the returned handle is dropped.
    pub fn transfer_style<P, Q>(&self, content_path: P, style_path: Q) -> StyleSwapResult<TransientImage>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let _span = trace_span!("transfer_style").entered();
        let content = load_rgb_image(content_path)?;
        let style = load_rgb_image(style_path)?;
        let result = self.transfer_images(&content, &style)?;
        TransientImage::write_png(&result)
    }

    /// Runs the pipeline on decoded images.
    pub fn transfer_images(&self, content: &RgbImage, style: &RgbImage) -> StyleSwapResult<RgbImage> {
        let bounds = &self.cfg.bounds;
        bounds.validate()?;
        let original = dims(content);
        if original.0 == 0 || original.1 == 0 {
            return Err(StyleSwapError::InvalidInput("content image is empty"));
        }
        if style.width() == 0 || style.height() == 0 {
            return Err(StyleSwapError::InvalidInput("style image is empty"));
        }

        let content_sized = bounds.apply(content.clone());
        let style_sized = bounds.apply(style.clone());
        trace_event!(
            "inputs_bounded",
            content_width = content_sized.width(),
            content_height = content_sized.height(),
            style_width = style_sized.width(),
            style_height = style_sized.height()
        );

        let norm = &self.cfg.normalization;
        let content_t = norm.normalize(&content_sized)?;
        let style_t = norm.normalize(&style_sized)?;
        drop(content_sized);
        drop(style_sized);

        let content_f = self.extract(&content_t)?;
        let style_f = self.extract(&style_t)?;
        let swapped = style_swap(&content_f, &style_f, self.cfg.parallel)?;
        let pixels = self.invert(&swapped)?;

        let _span = trace_span!("postprocess").entered();
        let mut result = norm.denormalize(&pixels)?;
        color_match(&mut result, style);
        let image = to_image(&result)?;
        Ok(finalize_size(image, original, bounds))
    }

    fn extract(&self, input: &Tensor) -> StyleSwapResult<FeatureMap> {
        FeatureExtractor::forward(&self.extractor, input).map_err(|err| {
            StyleSwapError::ExternalModel {
                stage: "feature extractor",
                reason: err.to_string(),
            }
        })
    }

    fn invert(&self, features: &FeatureMap) -> StyleSwapResult<Tensor> {
        let pixels = InverseNetwork::forward(&self.inverse, features).map_err(|err| {
            StyleSwapError::ExternalModel {
                stage: "inverse network",
                reason: err.to_string(),
            }
        })?;
        if pixels.channels() != 3 {
            return Err(StyleSwapError::ExternalModel {
                stage: "inverse network",
                reason: format!("expected 3 output channels, got {}", pixels.channels()),
            });
        }
        Ok(pixels)
    }
}
