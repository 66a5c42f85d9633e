//! The default integer k-means engine.

use rand::seq::SliceRandom;

use crate::{utils, FlatClusterer, Method, DEFAULT_MAX_ITERS};

mod elkan;
mod lloyd;

/// Integer k-means over `u8` data.
///
/// Centers are kept as `i32` values and distances are computed exactly as
/// `i64` squared Euclidean distances.
#[derive(Debug, Clone)]
pub struct IntegerKMeans {
    /// The training method.
    method: Method,
    /// The maximum number of training iterations.
    max_iters: usize,
    /// The verbosity level.
    verbosity: usize,
    /// The dimensionality of the data and centers.
    dims: usize,
    /// The centers, stored as a flat buffer with `dims` values per center.
    centers: Vec<i32>,
    /// The seed given when the centers were initialized.
    seed: Option<u64>,
}

impl IntegerKMeans {
    /// Returns the training method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the maximum number of training iterations.
    #[must_use]
    pub const fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the verbosity level.
    #[must_use]
    pub const fn verbosity(&self) -> usize {
        self.verbosity
    }

    /// Returns the dimensionality of the centers.
    ///
    /// This is zero until the centers are initialized.
    #[must_use]
    pub const fn dims(&self) -> usize {
        self.dims
    }

    /// Returns the centers as a flat buffer with `dims` values per center.
    #[must_use]
    pub fn centers(&self) -> &[i32] {
        &self.centers
    }

    /// Returns the center with the given label, if there is one.
    #[must_use]
    pub fn center(&self, label: usize) -> Option<&[i32]> {
        self.centers.chunks_exact(self.dims.max(1)).nth(label)
    }

    /// Re-seeds the centers that had no points assigned to them with random
    /// points from the data.
    fn reseed_empty<R: rand::Rng>(&mut self, data: &[i32], empty: &[usize], rng: &mut R) {
        let n = data.len() / self.dims;
        if n == 0 {
            return;
        }
        for &label in empty {
            let i = rng.gen_range(0..n);
            ftlog::debug!("ikm: re-seeding empty center {label} with point {i}");
            self.centers[label * self.dims..(label + 1) * self.dims]
                .copy_from_slice(&data[i * self.dims..(i + 1) * self.dims]);
        }
    }
}

impl FlatClusterer for IntegerKMeans {
    type Method = Method;

    fn new(method: Method) -> Self {
        Self {
            method,
            max_iters: DEFAULT_MAX_ITERS,
            verbosity: 0,
            dims: 0,
            centers: Vec::new(),
            seed: None,
        }
    }

    fn set_max_iters(&mut self, max_iters: usize) {
        self.max_iters = max_iters;
    }

    fn set_verbosity(&mut self, verbosity: usize) {
        self.verbosity = verbosity;
    }

    fn seed_from_data(&mut self, data: &[u8], dims: usize, n: usize, k: usize, seed: Option<u64>) -> Result<(), String> {
        if dims == 0 {
            return Err("The dimensionality must be positive.".to_string());
        }
        if data.len() != n * dims {
            return Err(format!(
                "Expected {n} points of dimensionality {dims} but the data hold {} values.",
                data.len()
            ));
        }
        if k > n {
            return Err(format!("Cannot seed {k} centers from {n} points."));
        }

        self.dims = dims;
        self.seed = seed;
        self.centers = Vec::with_capacity(k * dims);

        let mut permutation = (0..n).collect::<Vec<_>>();
        permutation.shuffle(&mut utils::rng(seed));

        // Skip points equal to an already chosen center, unless every
        // remaining point is needed to reach `k` centers.
        let mut chosen = 0;
        for (i, &p) in permutation.iter().enumerate() {
            if chosen == k {
                break;
            }
            let x = &data[p * dims..(p + 1) * dims];
            let is_duplicate = self
                .centers
                .chunks_exact(dims)
                .any(|c| c.iter().zip(x).all(|(&a, &b)| a == i32::from(b)));
            if !is_duplicate || n - i <= k - chosen {
                self.centers.extend(x.iter().copied().map(i32::from));
                chosen += 1;
            }
        }

        Ok(())
    }

    fn train(&mut self, data: &[u8]) -> Result<(), String> {
        if self.centers.is_empty() || data.is_empty() {
            return Ok(());
        }
        if data.len() % self.dims != 0 {
            return Err(format!(
                "The data hold {} values, which is not a multiple of the dimensionality {}.",
                data.len(),
                self.dims
            ));
        }

        let data = utils::widen(data);
        let mut rng = utils::rng(self.seed.map(|s| s.wrapping_add(1)));
        let n_iters = match self.method {
            Method::Lloyd => lloyd::train(self, &data, &mut rng),
            Method::Elkan => elkan::train(self, &data, &mut rng),
        };

        if self.verbosity > 0 {
            ftlog::info!(
                "ikm: {} trained {} centers on {} points in {n_iters} iterations",
                self.method.name(),
                self.branching(),
                data.len() / self.dims
            );
        }

        Ok(())
    }

    fn assign_batch(&self, data: &[u8]) -> Vec<usize> {
        if self.dims == 0 {
            return Vec::new();
        }
        data.chunks_exact(self.dims).map(|x| self.assign_one(x)).collect()
    }

    fn assign_one(&self, point: &[u8]) -> usize {
        if self.centers.is_empty() {
            return 0;
        }
        utils::nearest(&self.centers, self.dims, &utils::widen(point)).map_or(0, |(label, _)| label)
    }

    fn branching(&self) -> usize {
        if self.dims == 0 {
            0
        } else {
            self.centers.len() / self.dims
        }
    }
}
