//! Forward-pass interfaces for the external networks.
//!
//! The pipeline treats both networks as deterministic, side-effect-free
//! functions from tensor to tensor. Parameters are loaded by the implementor
//! at construction and never mutated, so `forward` takes `&self`; whether
//! concurrent calls are safe is up to the implementor's `Sync` bound.

mod pooled;

pub use pooled::PooledPixels;

use crate::tensor::{FeatureMap, Tensor};
use std::fmt::Display;

/// Maps a normalized `3 x H x W` pixel tensor to a feature map.
///
/// The channel depth of the output must not depend on the input.
pub trait FeatureExtractor {
    /// Error reported by a failed forward pass.
    type Error: Display;

    /// Runs the extractor on one normalized image.
    fn forward(&self, input: &Tensor) -> Result<FeatureMap, Self::Error>;
}

/// Decodes a feature map back into a normalized `3 x H x W` pixel tensor.
pub trait InverseNetwork {
    /// Error reported by a failed forward pass.
    type Error: Display;

    /// Runs the decoder on one feature map.
    fn forward(&self, features: &FeatureMap) -> Result<Tensor, Self::Error>;
}

impl<T: FeatureExtractor + ?Sized> FeatureExtractor for &T {
    type Error = T::Error;

    fn forward(&self, input: &Tensor) -> Result<FeatureMap, Self::Error> {
        (**self).forward(input)
    }
}

impl<T: InverseNetwork + ?Sized> InverseNetwork for &T {
    type Error = T::Error;

    fn forward(&self, features: &FeatureMap) -> Result<Tensor, Self::Error> {
        (**self).forward(features)
    }
}
