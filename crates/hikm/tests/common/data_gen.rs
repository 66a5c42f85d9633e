//! Data generation utilities for testing.

use rand::prelude::*;

/// The four points of the worked example, in two dimensions.
pub fn two_pairs() -> Vec<u8> {
    vec![0, 0, 0, 1, 9, 9, 9, 10]
}

/// Uniformly random points in `[0, 256)^dims`.
pub fn uniform(car: usize, dims: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..car * dims).map(|_| rng.gen()).collect()
}

/// Points scattered within a small box around each of `n_blobs` corners of
/// a coarse grid.
pub fn blobs(n_blobs: usize, per_blob: usize, dims: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(n_blobs * per_blob * dims);
    for b in 0..n_blobs {
        let corner = (0..dims)
            .map(|d| if (b >> (d % 8)) & 1 == 1 { 200 } else { 20 })
            .collect::<Vec<u8>>();
        for _ in 0..per_blob {
            data.extend(corner.iter().map(|&c| c + rng.gen_range(0..16)));
        }
    }
    data
}
