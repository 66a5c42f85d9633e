#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
#![doc = include_str!("../README.md")]

mod clusterer;
mod kmeans;
mod method;
pub mod utils;

pub use clusterer::FlatClusterer;
pub use kmeans::IntegerKMeans;
pub use method::Method;

/// The default cap on the number of training iterations.
pub const DEFAULT_MAX_ITERS: usize = 200;

/// The version of the crate.
pub const VERSION: &str = "0.1.0";
