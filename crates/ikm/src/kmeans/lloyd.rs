//! Lloyd's algorithm.

use rand::Rng;

use crate::utils;

use super::IntegerKMeans;

/// Trains the centers of `model` on the widened `data`.
///
/// Returns the number of iterations performed.
pub(super) fn train<R: Rng>(model: &mut IntegerKMeans, data: &[i32], rng: &mut R) -> usize {
    let dims = model.dims;
    let n = data.len() / dims;
    let mut labels = vec![usize::MAX; n];

    for iter in 0..model.max_iters {
        let mut energy = 0_i64;
        let mut n_changed = 0_usize;
        for (label, x) in labels.iter_mut().zip(data.chunks_exact(dims)) {
            let (best, d) = utils::nearest(&model.centers, dims, x)
                .unwrap_or_else(|| unreachable!("The model has at least one center."));
            energy += d;
            if *label != best {
                *label = best;
                n_changed += 1;
            }
        }

        if model.verbosity > 0 {
            ftlog::debug!("ikm: lloyd iter {iter}: energy = {energy}, changed = {n_changed}");
        }

        if n_changed == 0 {
            return iter + 1;
        }

        let empty = utils::update_centers(&mut model.centers, dims, data, &labels);
        model.reseed_empty(data, &empty, rng);
    }

    model.max_iters
}
