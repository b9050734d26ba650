use styleswap::lowlevel::{grid_dims, OverlapCount};
use styleswap::{Assignment, PatchSet, StyleSwapError, Tensor};

#[test]
fn tensor_rejects_invalid_dimensions() {
    let err = Tensor::new(vec![0.0; 4], 0, 2, 2).unwrap_err();
    assert_eq!(
        err,
        StyleSwapError::InvalidDimensions {
            channels: 0,
            height: 2,
            width: 2,
        }
    );

    let err = Tensor::zeros(1, 0, 3).unwrap_err();
    assert_eq!(
        err,
        StyleSwapError::InvalidDimensions {
            channels: 1,
            height: 0,
            width: 3,
        }
    );
}

#[test]
fn tensor_rejects_wrong_buffer_length() {
    let err = Tensor::new(vec![0.0; 5], 1, 2, 3).unwrap_err();
    assert_eq!(err, StyleSwapError::BufferTooSmall { needed: 6, got: 5 });

    let err = Tensor::new(vec![0.0; 7], 1, 2, 3).unwrap_err();
    assert_eq!(
        err,
        StyleSwapError::InvalidDimensions {
            channels: 1,
            height: 2,
            width: 3,
        }
    );
}

#[test]
fn patch_set_enumerates_row_major() {
    // Two channels, 4x5 map; value encodes (channel, row, col).
    let (channels, height, width) = (2, 4, 5);
    let mut data = Vec::new();
    for c in 0..channels {
        for y in 0..height {
            for x in 0..width {
                data.push((c * 100 + y * 10 + x) as f32);
            }
        }
    }
    let features = Tensor::new(data, channels, height, width).unwrap();
    let set = PatchSet::extract(&features, 3).unwrap();

    assert_eq!(set.len(), 2 * 3);
    assert_eq!((set.grid_height(), set.grid_width()), (2, 3));
    assert_eq!(set.patch_len(), 18);

    // Patch 4 is row 1, column 1.
    assert_eq!(set.coord(4), Some((1, 1)));
    let patch = set.patch(4).unwrap();
    assert_eq!(&patch[..9], &[11.0, 12.0, 13.0, 21.0, 22.0, 23.0, 31.0, 32.0, 33.0]);
    assert_eq!(&patch[9..12], &[111.0, 112.0, 113.0]);
}

#[test]
fn patch_kernels_have_unit_norm() {
    let data: Vec<f32> = (0..48).map(|v| (v as f32 * 0.37).sin()).collect();
    let features = Tensor::new(data, 3, 4, 4).unwrap();
    let set = PatchSet::extract(&features, 3).unwrap();
    for idx in 0..set.len() {
        let norm: f32 = set.kernel(idx).unwrap().iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "patch {idx} norm {norm}");
        // Kernels are scaled copies of the raw patch.
        let raw = set.patch(idx).unwrap();
        let raw_norm: f32 = raw.iter().map(|v| v * v).sum::<f32>().sqrt();
        for (k, r) in set.kernel(idx).unwrap().iter().zip(raw) {
            assert!((k * raw_norm - r).abs() < 1e-5);
        }
    }
}

#[test]
fn patch_extraction_rejects_small_maps() {
    let features = Tensor::zeros(4, 2, 10).unwrap();
    let err = PatchSet::extract(&features, 3).unwrap_err();
    assert_eq!(
        err,
        StyleSwapError::PatchTooLarge {
            patch: 3,
            height: 2,
            width: 10,
        }
    );
    assert!(grid_dims(3, 3, 3).is_ok());
}

#[test]
fn assignment_accessors_are_row_major() {
    let assignment = Assignment::new(2, 3, vec![5, 4, 3, 2, 1, 0], vec![0.0; 6]).unwrap();
    assert_eq!(assignment.index_at(0, 2), Some(3));
    assert_eq!(assignment.index_at(1, 0), Some(2));
    assert!(assignment.index_at(2, 0).is_none());
    assert_eq!(assignment.len(), 6);
}

#[test]
fn overlap_count_grid_size() {
    let counts = OverlapCount::for_grid(4, 6, 3);
    assert_eq!((counts.height(), counts.width()), (6, 8));
    assert_eq!(counts.get(0, 0), Some(1));
    assert_eq!(counts.get(5, 7), Some(1));
    assert!(counts.get(6, 0).is_none());
}
