use styleswap::image::size::{
    enforce_maximum, enforce_minimum, finalize_size, maximum_dims, minimum_dims,
};
use styleswap::SizeBounds;

fn solid(width: u32, height: u32) -> image::RgbImage {
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 200]))
}

#[test]
fn small_content_is_upscaled_and_style_is_untouched() {
    let bounds = SizeBounds::default();
    assert_eq!((bounds.min_size, bounds.max_size), (228, 512));

    // Content 100 tall, 150 wide.
    assert_eq!(minimum_dims(150, 100, 228), (342, 228));
    assert_eq!(maximum_dims(342, 228, 512), (342, 228));

    let content = bounds.apply(solid(150, 100));
    assert_eq!((content.width(), content.height()), (342, 228));

    let style = bounds.apply(solid(300, 300));
    assert_eq!((style.width(), style.height()), (300, 300));
}

#[test]
fn bounds_are_idempotent_on_in_range_images() {
    for (w, h) in [(228, 228), (300, 400), (512, 512), (512, 228)] {
        let once = enforce_minimum(solid(w, h), 228);
        assert_eq!((once.width(), once.height()), (w, h));
        let once = enforce_maximum(once, 512);
        assert_eq!((once.width(), once.height()), (w, h));
    }

    let up = enforce_minimum(solid(90, 60), 228);
    let again = enforce_minimum(up.clone(), 228);
    assert_eq!(up.dimensions(), again.dimensions());

    let down = enforce_maximum(solid(1000, 700), 512);
    assert_eq!(down.dimensions(), (512, 358));
    let again = enforce_maximum(down.clone(), 512);
    assert_eq!(down.dimensions(), again.dimensions());
}

#[test]
fn resampling_a_solid_image_keeps_its_color() {
    let up = enforce_minimum(solid(50, 40), 228);
    assert!(up.pixels().all(|p| p.0 == [40, 90, 200]));
}

#[test]
fn finalize_restores_undersized_content_only() {
    let bounds = SizeBounds::default();
    let restored = finalize_size(solid(336, 224), (150, 100), &bounds);
    assert_eq!(restored.dimensions(), (150, 100));

    let kept = finalize_size(solid(336, 224), (600, 400), &bounds);
    assert_eq!(kept.dimensions(), (336, 224));

    let kept = finalize_size(solid(300, 300), (300, 300), &bounds);
    assert_eq!(kept.dimensions(), (300, 300));
}

#[test]
fn invalid_bounds_are_rejected() {
    assert!(SizeBounds {
        min_size: 0,
        max_size: 10
    }
    .validate()
    .is_err());
    assert!(SizeBounds {
        min_size: 20,
        max_size: 10
    }
    .validate()
    .is_err());
    assert!(SizeBounds::default().validate().is_ok());
}
