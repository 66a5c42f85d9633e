//! Training methods for integer k-means.

/// The algorithm used to train the centers.
///
/// Both methods converge to the same fixed point from the same seeding,
/// except possibly when a point is equidistant from two centers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Method {
    /// Lloyd's algorithm: a full assignment pass per iteration.
    #[default]
    Lloyd,

    /// Elkan's algorithm: Lloyd's algorithm with triangle-inequality bounds
    /// that skip most point-to-center distance computations.
    Elkan,
}

impl Method {
    /// Returns the name of the method.
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Lloyd => "Lloyd",
            Self::Elkan => "Elkan",
        }
    }

    /// Returns the method from a string representation of the name.
    ///
    /// The string is case-insensitive.
    ///
    /// # Errors
    ///
    /// If the string does not match any of the methods.
    pub fn from_name(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "lloyd" => Ok(Self::Lloyd),
            "elkan" => Ok(Self::Elkan),
            _ => Err(format!("Unknown method: {s}")),
        }
    }

    /// Returns a list of all the methods.
    #[must_use]
    pub const fn variants<'a>() -> &'a [Self] {
        &[Self::Lloyd, Self::Elkan]
    }
}
