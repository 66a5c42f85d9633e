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

mod builder;
mod node;
pub mod partition;
pub mod progress;
mod tree;

pub use ikm::{FlatClusterer, IntegerKMeans, Method};
pub use node::Node;
pub use progress::{LogProgress, Progress, Silent};
pub use tree::{State, Tree};

/// The version of the crate.
pub const VERSION: &str = "0.1.0";
