//! Pixel-space color correction and conversion back to 8-bit images.

use crate::tensor::Tensor;
use crate::trace::trace_span;
use crate::util::stats::Moments;
use crate::util::{StyleSwapError, StyleSwapResult};
use image::RgbImage;

/// Below this standard deviation a result is treated as flat.
const FLAT_STD: f64 = 1e-8;

/// Matches the global mean and standard deviation of `result` to `style`.
///
/// Statistics pool all channels together; `style` is read in `[0, 1]`. A flat
/// result has nothing to rescale and is moved to the style mean. Values are
/// clipped to `[0, 1]` afterwards.
pub fn color_match(result: &mut Tensor, style: &RgbImage) {
    let _span = trace_span!("color_match").entered();
    let target = Moments::of(style.as_raw().iter().map(|&v| f64::from(v) / 255.0));
    let current = Moments::of(result.as_slice().iter().map(|&v| f64::from(v)));
    let scale = if current.std > FLAT_STD {
        target.std / current.std
    } else {
        0.0
    };
    for v in result.as_mut_slice() {
        let shifted = (f64::from(*v) - current.mean) * scale + target.mean;
        *v = shifted.clamp(0.0, 1.0) as f32;
    }
}

/// Converts a `3 x H x W` tensor in `[0, 1]` to an 8-bit RGB image.
pub fn to_image(tensor: &Tensor) -> StyleSwapResult<RgbImage> {
    let (channels, height, width) = tensor.shape();
    if channels != 3 {
        return Err(StyleSwapError::InvalidInput(
            "image conversion expects a 3-channel tensor",
        ));
    }
    let invalid = StyleSwapError::InvalidDimensions {
        channels,
        height,
        width,
    };
    let w = u32::try_from(width).map_err(|_| invalid.clone())?;
    let h = u32::try_from(height).map_err(|_| invalid.clone())?;

    let plane_len = tensor.plane_len();
    let data = tensor.as_slice();
    let mut raw = Vec::with_capacity(plane_len * 3);
    for i in 0..plane_len {
        for c in 0..3 {
            let v = data[c * plane_len + i].clamp(0.0, 1.0);
            raw.push((v * 255.0).round() as u8);
        }
    }
    RgbImage::from_raw(w, h, raw).ok_or(invalid)
}

#[cfg(test)]
mod tests {
    use super::{color_match, to_image};
    use crate::tensor::Tensor;
    use image::{Rgb, RgbImage};

    #[test]
    fn flat_result_moves_to_style_mean() {
        let style = RgbImage::from_pixel(2, 2, Rgb([51, 102, 153]));
        let mut result = Tensor::filled(3, 2, 2, 0.9).unwrap();
        color_match(&mut result, &style);
        let expected = (51.0 + 102.0 + 153.0) / 3.0 / 255.0;
        assert!(result
            .as_slice()
            .iter()
            .all(|v| (f64::from(*v) - expected).abs() < 1e-6));
    }

    #[test]
    fn to_image_rounds_and_interleaves() {
        let mut data = vec![0.0f32; 3];
        data[0] = 1.0;
        data[1] = 0.5;
        data[2] = 0.002;
        let t = Tensor::new(data, 3, 1, 1).unwrap();
        let img = to_image(&t).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 128, 1]));
    }
}
