//! A HIKM `Tree`: configuration, training, and assignment of paths.

use ikm::{FlatClusterer, IntegerKMeans, Method, DEFAULT_MAX_ITERS};
use rayon::prelude::*;

use crate::{
    builder::{self, Params},
    LogProgress, Node, Progress,
};

/// The lifecycle state of a `Tree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Created, but the dimensionality, branching factor and depth are not set.
    New,
    /// Configured, but not trained.
    Configured,
    /// Trained; the tree has a root.
    Trained,
}

/// A Hierarchical Integer K-Means tree.
///
/// The nodes are stored in a single arena. The root is at index 0 and the
/// children of every node occupy a contiguous range of indices. Dropping the
/// `Tree` releases every node and every clustering model exactly once.
///
/// # Type Parameters
///
/// - `C`: The flat clustering engine used by every node.
#[derive(Debug, Clone)]
pub struct Tree<C: FlatClusterer = IntegerKMeans> {
    /// The dimensionality of the data.
    dims: usize,
    /// The configured branching factor.
    branching: usize,
    /// The number of levels of nodes.
    depth: usize,
    /// The method used by the flat clustering engine.
    method: C::Method,
    /// The maximum number of training iterations per node.
    max_iters: usize,
    /// The verbosity level.
    verbosity: usize,
    /// An optional seed for random number generation.
    seed: Option<u64>,
    /// The arena of nodes. Empty until the tree is trained.
    nodes: Vec<Node<C>>,
}

impl Tree {
    /// Creates a new, unconfigured `Tree` using integer k-means with the
    /// given method at every node.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self::with_method(method)
    }
}

impl<C: FlatClusterer> Default for Tree<C> {
    fn default() -> Self {
        Self::with_method(C::Method::default())
    }
}

impl<C: FlatClusterer> Tree<C> {
    /// Creates a new, unconfigured `Tree` whose nodes use the flat clustering
    /// engine `C` with the given method.
    ///
    /// The dimensionality, branching factor and depth are zero, the maximum
    /// number of iterations is 200 and the verbosity is zero.
    #[must_use]
    pub const fn with_method(method: C::Method) -> Self {
        Self {
            dims: 0,
            branching: 0,
            depth: 0,
            method,
            max_iters: DEFAULT_MAX_ITERS,
            verbosity: 0,
            seed: None,
            nodes: Vec::new(),
        }
    }

    /// Sets the maximum number of training iterations per node.
    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Sets the verbosity level.
    ///
    /// Progress is reported for nodes at levels below the verbosity, and the
    /// flat clustering engines run with one level less.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: usize) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Sets the seed for random number generation.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the maximum number of training iterations per node.
    pub fn set_max_iters(&mut self, max_iters: usize) {
        self.max_iters = max_iters;
    }

    /// Sets the verbosity level.
    pub fn set_verbosity(&mut self, verbosity: usize) {
        self.verbosity = verbosity;
    }

    /// Sets the seed for random number generation.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Sets the dimensionality, branching factor and depth of the tree.
    ///
    /// Any trained nodes are released.
    ///
    /// # Errors
    ///
    /// * If any of `dims`, `branching` or `depth` is zero.
    pub fn configure(&mut self, dims: usize, branching: usize, depth: usize) -> Result<(), String> {
        if dims == 0 || branching == 0 || depth == 0 {
            let msg = format!(
                "The dimensionality, branching factor and depth must be positive. Got {dims}, {branching} and {depth}."
            );
            ftlog::error!("{msg}");
            return Err(msg);
        }

        self.clear();
        self.dims = dims;
        self.branching = branching;
        self.depth = depth;

        Ok(())
    }

    /// Trains the tree on the given data, logging progress.
    ///
    /// See [`Tree::train_with_progress`].
    ///
    /// # Errors
    ///
    /// See [`Tree::train_with_progress`].
    pub fn train(&mut self, data: &[u8]) -> Result<(), String> {
        self.train_with_progress(data, &mut LogProgress)
    }

    /// Trains the tree on the given data.
    ///
    /// If the tree was already trained, the previous nodes are released before
    /// the new ones are built. The root uses `min(branching, n)` clusters for
    /// `n` points.
    ///
    /// # Arguments
    ///
    /// * `data` - The flat buffer of points, `dims` values per point.
    /// * `progress` - The sink for progress notifications.
    ///
    /// # Errors
    ///
    /// * If the tree has not been configured.
    /// * If `data` is empty.
    /// * If the length of `data` is not a multiple of the dimensionality.
    /// * Any error from the flat clustering engine.
    pub fn train_with_progress<P: Progress>(&mut self, data: &[u8], progress: &mut P) -> Result<(), String> {
        if self.state() == State::New {
            let msg = "The tree must be configured before it is trained.".to_string();
            ftlog::error!("{msg}");
            return Err(msg);
        }
        if data.is_empty() {
            let msg = "Cannot train a tree on empty data.".to_string();
            ftlog::error!("{msg}");
            return Err(msg);
        }
        if data.len() % self.dims != 0 {
            let msg = format!(
                "The data hold {} values, which is not a multiple of the dimensionality {}.",
                data.len(),
                self.dims
            );
            ftlog::error!("{msg}");
            return Err(msg);
        }

        self.clear();

        let n = data.len() / self.dims;
        let params = Params {
            dims: self.dims,
            depth: self.depth,
            method: self.method,
            max_iters: self.max_iters,
            verbosity: self.verbosity,
            seed: self.seed,
        };
        self.nodes = builder::build(&params, data, self.branching.min(n), progress)?;

        ftlog::info!(
            "hikmeans: trained a tree of depth {} with {} nodes on {n} points",
            self.depth,
            self.nodes.len()
        );

        Ok(())
    }

    /// Releases all nodes, returning a trained tree to the configured state.
    pub fn clear(&mut self) {
        self.nodes = Vec::new();
    }

    /// Returns the path of labels for every point in `queries`.
    ///
    /// Every path has exactly `depth` labels. The walk for each point starts
    /// at the root and descends into the child of the nearest center until a
    /// leaf is reached. If a node trained on zero points is reached before the
    /// last level, the rest of the path is filled with zeros.
    ///
    /// # Errors
    ///
    /// * If the tree has not been trained.
    /// * If the length of `queries` is not a multiple of the dimensionality.
    pub fn assign(&self, queries: &[u8]) -> Result<Vec<Vec<usize>>, String> {
        self.check_queries(queries)?;
        Ok(queries.chunks_exact(self.dims).map(|x| self.walk(x)).collect())
    }

    /// Returns the path of labels for a single point.
    ///
    /// # Errors
    ///
    /// * If the tree has not been trained.
    /// * If the length of `point` is not the dimensionality.
    pub fn path_of(&self, point: &[u8]) -> Result<Vec<usize>, String> {
        if point.len() != self.dims {
            return Err(format!(
                "The point has {} values but the tree has dimensionality {}.",
                point.len(),
                self.dims
            ));
        }
        self.check_queries(point)?;
        Ok(self.walk(point))
    }

    /// Ensures that the tree is trained and that `queries` holds whole points.
    fn check_queries(&self, queries: &[u8]) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("The tree must be trained before points are assigned.".to_string());
        }
        if queries.len() % self.dims != 0 {
            return Err(format!(
                "The queries hold {} values, which is not a multiple of the dimensionality {}.",
                queries.len(),
                self.dims
            ));
        }
        Ok(())
    }

    /// Pushes one point from the root down to a leaf.
    fn walk(&self, point: &[u8]) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.depth);
        let mut node = &self.nodes[0];
        loop {
            let label = node.model().assign_one(point);
            path.push(label);
            match node.child(label) {
                Some(i) => node = &self.nodes[i],
                None => break,
            }
        }
        path.resize(self.depth, 0);
        path
    }

    /// Returns the lifecycle state of the tree.
    #[must_use]
    pub fn state(&self) -> State {
        if !self.nodes.is_empty() {
            State::Trained
        } else if self.depth == 0 {
            State::New
        } else {
            State::Configured
        }
    }

    /// Returns the dimensionality of the data.
    #[must_use]
    pub const fn dims(&self) -> usize {
        self.dims
    }

    /// Returns the configured branching factor.
    #[must_use]
    pub const fn branching(&self) -> usize {
        self.branching
    }

    /// Returns the depth of the tree.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the method used by the flat clustering engine.
    #[must_use]
    pub const fn method(&self) -> C::Method {
        self.method
    }

    /// Returns the maximum number of training iterations per node.
    #[must_use]
    pub const fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the verbosity level.
    #[must_use]
    pub const fn verbosity(&self) -> usize {
        self.verbosity
    }

    /// Returns the seed for random number generation.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the root of the tree, if it has been trained.
    #[must_use]
    pub fn root(&self) -> Option<&Node<C>> {
        self.nodes.first()
    }

    /// Returns the node at the given arena index.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&Node<C>> {
        self.nodes.get(index)
    }

    /// Returns the children of the node at the given arena index.
    ///
    /// The slice is empty for leaves and for indices outside the arena.
    #[must_use]
    pub fn children_of(&self, index: usize) -> &[Node<C>] {
        match self.nodes.get(index) {
            Some(node) => &self.nodes[node.children()],
            None => &[],
        }
    }

    /// Returns all nodes in arena order.
    #[must_use]
    pub fn nodes(&self) -> &[Node<C>] {
        &self.nodes
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the leaves of the tree in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node<C>> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }
}

impl<C> Tree<C>
where
    C: FlatClusterer + Send + Sync,
    C::Method: Send + Sync,
{
    /// Parallel version of [`Tree::assign`].
    ///
    /// # Errors
    ///
    /// See [`Tree::assign`].
    pub fn par_assign(&self, queries: &[u8]) -> Result<Vec<Vec<usize>>, String> {
        self.check_queries(queries)?;
        Ok(queries.par_chunks_exact(self.dims).map(|x| self.walk(x)).collect())
    }
}
