//! The `FlatClusterer` trait, the contract for single-level clustering engines.

use core::fmt::Debug;

/// A single-level clustering engine over `u8` data.
///
/// The data are always given as a flat buffer of `n * dims` values, where
/// each consecutive run of `dims` values is one point.
///
/// Releasing the engine is handled by `Drop`.
pub trait FlatClusterer: Sized {
    /// The training method(s) supported by the engine.
    type Method: Copy + Default + Debug;

    /// Creates a new, untrained engine which will use the given method.
    fn new(method: Self::Method) -> Self;

    /// Sets the maximum number of training iterations.
    fn set_max_iters(&mut self, max_iters: usize);

    /// Sets the verbosity level. Zero is silent.
    fn set_verbosity(&mut self, verbosity: usize);

    /// Initializes `k` centers from the given data.
    ///
    /// # Arguments
    ///
    /// * `data` - The flat buffer of points.
    /// * `dims` - The dimensionality of the points.
    /// * `n` - The number of points in `data`.
    /// * `k` - The number of centers to create. Must not exceed `n`.
    /// * `seed` - An optional seed for random number generation.
    ///
    /// # Errors
    ///
    /// * If `dims` is zero.
    /// * If `data` does not hold exactly `n` points.
    /// * If `k` is greater than `n`.
    fn seed_from_data(&mut self, data: &[u8], dims: usize, n: usize, k: usize, seed: Option<u64>) -> Result<(), String>;

    /// Refines the centers over the given data.
    ///
    /// Training on zero points must leave the engine in a usable state.
    ///
    /// # Errors
    ///
    /// * If `data` is not a whole number of points.
    fn train(&mut self, data: &[u8]) -> Result<(), String>;

    /// Returns the label of the nearest center for every point in `data`.
    fn assign_batch(&self, data: &[u8]) -> Vec<usize>;

    /// Returns the label of the nearest center to `point`.
    fn assign_one(&self, point: &[u8]) -> usize;

    /// Returns the number of centers actually held by the engine.
    fn branching(&self) -> usize;
}
