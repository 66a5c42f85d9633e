//! Elkan's algorithm.
//!
//! Every point keeps an upper bound on the distance to its own center and a
//! lower bound on the distance to every other center. A point is only
//! compared against a center when the bounds, together with the
//! center-to-center distances, cannot rule that center out.

use rand::Rng;

use crate::{utils, FlatClusterer};

use super::IntegerKMeans;

/// Trains the centers of `model` on the widened `data`.
///
/// Returns the number of iterations performed.
pub(super) fn train<R: Rng>(model: &mut IntegerKMeans, data: &[i32], rng: &mut R) -> usize {
    let dims = model.dims;
    let k = model.branching();
    let n = data.len() / dims;

    let mut labels = vec![0_usize; n];
    let mut upper = vec![0_f64; n];
    let mut lower = vec![0_f64; n * k];

    for (i, x) in data.chunks_exact(dims).enumerate() {
        let (best, _) = utils::nearest(&model.centers, dims, x)
            .unwrap_or_else(|| unreachable!("The model has at least one center."));
        let row = &mut lower[i * k..(i + 1) * k];
        for (l, c) in row.iter_mut().zip(model.centers.chunks_exact(dims)) {
            *l = utils::distance(x, c);
        }
        labels[i] = best;
        upper[i] = row[best];
    }

    for iter in 0..model.max_iters {
        let old_centers = model.centers.clone();
        let empty = utils::update_centers(&mut model.centers, dims, data, &labels);
        model.reseed_empty(data, &empty, rng);

        let centers = &model.centers;
        let shifts = old_centers
            .chunks_exact(dims)
            .zip(centers.chunks_exact(dims))
            .map(|(a, b)| utils::distance(a, b))
            .collect::<Vec<_>>();

        for (i, &label) in labels.iter().enumerate() {
            upper[i] += shifts[label];
            for (l, &s) in lower[i * k..(i + 1) * k].iter_mut().zip(&shifts) {
                *l = (*l - s).max(0.);
            }
        }

        let mut pairwise = vec![0_f64; k * k];
        for (a, ca) in centers.chunks_exact(dims).enumerate() {
            for (b, cb) in centers.chunks_exact(dims).enumerate().skip(a + 1) {
                let d = utils::distance(ca, cb);
                pairwise[a * k + b] = d;
                pairwise[b * k + a] = d;
            }
        }
        let half_separation = (0..k)
            .map(|a| {
                let nearest_other = (0..k)
                    .filter(|&b| b != a)
                    .map(|b| pairwise[a * k + b])
                    .fold(f64::INFINITY, f64::min);
                nearest_other / 2.
            })
            .collect::<Vec<_>>();

        let mut n_changed = 0_usize;
        for (i, x) in data.chunks_exact(dims).enumerate() {
            let mut a = labels[i];
            if upper[i] <= half_separation[a] {
                continue;
            }

            let mut is_stale = true;
            for b in 0..k {
                if b == a || upper[i] <= lower[i * k + b] || upper[i] <= pairwise[a * k + b] / 2. {
                    continue;
                }

                if is_stale {
                    let d = utils::distance(x, &centers[a * dims..(a + 1) * dims]);
                    upper[i] = d;
                    lower[i * k + a] = d;
                    is_stale = false;
                    if upper[i] <= lower[i * k + b] || upper[i] <= pairwise[a * k + b] / 2. {
                        continue;
                    }
                }

                let d = utils::distance(x, &centers[b * dims..(b + 1) * dims]);
                lower[i * k + b] = d;
                if d < upper[i] {
                    a = b;
                    upper[i] = d;
                }
            }

            if a != labels[i] {
                labels[i] = a;
                n_changed += 1;
            }
        }

        if model.verbosity > 0 {
            ftlog::debug!("ikm: elkan iter {iter}: changed = {n_changed}");
        }

        if n_changed == 0 {
            return iter + 1;
        }
    }

    model.max_iters
}
