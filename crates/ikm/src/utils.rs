//! Helpers shared by the training methods.

use distances::vectors::{euclidean, euclidean_sq};
use rand::{rngs::StdRng, SeedableRng};

/// Widens `u8` data to the `i32` representation used for centers.
#[must_use]
pub fn widen(data: &[u8]) -> Vec<i32> {
    data.iter().copied().map(i32::from).collect()
}

/// Squared Euclidean distance between a point and a center.
#[must_use]
pub fn distance_sq(x: &[i32], center: &[i32]) -> i64 {
    euclidean_sq::<i32, i64>(x, center)
}

/// Euclidean distance between two integer vectors.
#[must_use]
pub fn distance(x: &[i32], y: &[i32]) -> f64 {
    euclidean::<i32, f64>(x, y)
}

/// Return the index and value of the minimum value in the given values.
///
/// Ties are resolved in favor of the lowest index. Returns `None` if there
/// are no values.
pub fn arg_min<T: Ord + Copy, I: IntoIterator<Item = T>>(values: I) -> Option<(usize, T)> {
    values.into_iter().enumerate().min_by_key(|&(_, v)| v)
}

/// Finds the nearest center to `x`.
///
/// The centers are given as a flat buffer with `dims` values per center.
/// Returns the label of the nearest center and the squared distance to it,
/// or `None` if there are no centers.
#[must_use]
pub fn nearest(centers: &[i32], dims: usize, x: &[i32]) -> Option<(usize, i64)> {
    arg_min(centers.chunks_exact(dims).map(|c| distance_sq(x, c)))
}

/// Recomputes every center as the rounded mean of the points assigned to it.
///
/// Returns the labels of the centers that had no points assigned. Those
/// centers are left untouched.
pub(crate) fn update_centers(centers: &mut [i32], dims: usize, data: &[i32], labels: &[usize]) -> Vec<usize> {
    let k = centers.len() / dims;
    let mut sums = vec![0_i64; centers.len()];
    let mut counts = vec![0_i64; k];

    for (x, &label) in data.chunks_exact(dims).zip(labels) {
        counts[label] += 1;
        let sum = &mut sums[label * dims..(label + 1) * dims];
        for (s, &v) in sum.iter_mut().zip(x) {
            *s += i64::from(v);
        }
    }

    let mut empty = Vec::new();
    for (label, (center, sum)) in centers.chunks_exact_mut(dims).zip(sums.chunks_exact(dims)).enumerate() {
        let count = counts[label];
        if count == 0 {
            empty.push(label);
            continue;
        }
        for (c, &s) in center.iter_mut().zip(sum) {
            // The values are non-negative so this rounds half up.
            #[allow(clippy::cast_possible_truncation)]
            let mean = ((s + count / 2) / count) as i32;
            *c = mean;
        }
    }

    empty
}

/// Builds the random number generator for the given optional seed.
pub(crate) fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}
