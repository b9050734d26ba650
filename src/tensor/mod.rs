//! Channel-major float tensors.
//!
//! `Tensor` stores a `channels x height x width` grid contiguously, one plane
//! per channel, rows within a plane in order. The same type carries normalized
//! pixel tensors (three channels) and feature maps of arbitrary depth, so the
//! forward-pass traits in [`crate::model`] consume and produce it directly.

use crate::util::{StyleSwapError, StyleSwapResult};

pub mod normalize;

/// Feature map produced by a feature extractor.
pub type FeatureMap = Tensor;

/// Owned contiguous `C x H x W` tensor of `f32` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    channels: usize,
    height: usize,
    width: usize,
}

impl Tensor {
    /// Wraps a channel-major buffer whose length must equal `channels * height * width`.
    pub fn new(
        data: Vec<f32>,
        channels: usize,
        height: usize,
        width: usize,
    ) -> StyleSwapResult<Self> {
        let needed = checked_len(channels, height, width)?;
        if data.len() < needed {
            return Err(StyleSwapError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(StyleSwapError::InvalidDimensions {
                channels,
                height,
                width,
            });
        }
        Ok(Self {
            data,
            channels,
            height,
            width,
        })
    }

    /// Creates a tensor with every element set to `value`.
    pub fn filled(channels: usize, height: usize, width: usize, value: f32) -> StyleSwapResult<Self> {
        let len = checked_len(channels, height, width)?;
        Ok(Self {
            data: vec![value; len],
            channels,
            height,
            width,
        })
    }

    /// Creates a zero tensor.
    pub fn zeros(channels: usize, height: usize, width: usize) -> StyleSwapResult<Self> {
        Self::filled(channels, height, width, 0.0)
    }

    /// Returns the channel depth.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the spatial height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the spatial width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns `(channels, height, width)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.channels, self.height, self.width)
    }

    /// Number of elements in one channel plane.
    pub fn plane_len(&self) -> usize {
        self.height * self.width
    }

    /// Returns the full channel-major buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the full channel-major buffer mutably.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the tensor and returns its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Returns the plane for channel `c`.
    pub fn plane(&self, c: usize) -> Option<&[f32]> {
        if c >= self.channels {
            return None;
        }
        let len = self.plane_len();
        self.data.get(c * len..(c + 1) * len)
    }

    /// Returns row `y` of channel `c`.
    pub fn row(&self, c: usize, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let plane = self.plane(c)?;
        plane.get(y * self.width..(y + 1) * self.width)
    }

    /// Returns the element at `(c, y, x)` if it is within bounds.
    pub fn get(&self, c: usize, y: usize, x: usize) -> Option<f32> {
        if x >= self.width {
            return None;
        }
        self.row(c, y)?.get(x).copied()
    }
}

fn checked_len(channels: usize, height: usize, width: usize) -> StyleSwapResult<usize> {
    let invalid = StyleSwapError::InvalidDimensions {
        channels,
        height,
        width,
    };
    if channels == 0 || height == 0 || width == 0 {
        return Err(invalid);
    }
    channels
        .checked_mul(height)
        .and_then(|v| v.checked_mul(width))
        .ok_or(invalid)
}
