#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use styleswap::lowlevel::{best_matches_par, find_matches, CorrelationScalar, Kernel};
use styleswap::{PatchSet, Tensor, PATCH_SIZE};

fn random_tensor(rng: &mut StdRng, channels: usize, height: usize, width: usize) -> Tensor {
    let data = (0..channels * height * width)
        .map(|_| rng.random_range(-2.0f32..2.0))
        .collect();
    Tensor::new(data, channels, height, width).unwrap()
}

#[test]
fn parallel_matches_sequential_scan() {
    let mut rng = StdRng::seed_from_u64(21);
    let style = random_tensor(&mut rng, 5, 12, 11);
    let content = random_tensor(&mut rng, 5, 20, 23);
    let patches = PatchSet::extract(&style, PATCH_SIZE).unwrap();

    let seq = CorrelationScalar::best_matches(&content, &patches).unwrap();
    let par = best_matches_par(&content, &patches).unwrap();
    assert_eq!(seq, par);

    let via_dispatch = find_matches(&content, &patches, true).unwrap();
    assert_eq!(seq, via_dispatch);
}

#[test]
fn parallel_scan_keeps_first_index_on_ties() {
    let style = Tensor::filled(3, 6, 6, 0.25).unwrap();
    let content = Tensor::filled(3, 9, 7, -1.0).unwrap();
    let patches = PatchSet::extract(&style, PATCH_SIZE).unwrap();
    let par = best_matches_par(&content, &patches).unwrap();
    assert!(par.indices().iter().all(|&i| i == 0));
}
