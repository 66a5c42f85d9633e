//! A `Node` in a HIKM `Tree`.

use core::ops::Range;

use ikm::FlatClusterer;

/// A node of a HIKM `Tree`.
///
/// Every node owns the flat clustering model it was trained with. The
/// children of a node are stored in the arena of the `Tree`, at the
/// contiguous range of indices returned by `Node::children`. Child `k`
/// corresponds to cluster label `k` of the model.
#[derive(Debug, Clone)]
pub struct Node<C> {
    /// The trained flat clustering model.
    model: C,
    /// The depth of the node in the tree. The root is at depth 0.
    depth: usize,
    /// The number of points the node was trained on.
    cardinality: usize,
    /// The start and end of the range of indices of the children in the arena.
    children: (usize, usize),
}

impl<C: FlatClusterer> Node<C> {
    /// Creates a new `Node` with children at `start..end`.
    pub(crate) const fn new(model: C, depth: usize, cardinality: usize, children: (usize, usize)) -> Self {
        Self {
            model,
            depth,
            cardinality,
            children,
        }
    }

    /// Creates a new leaf `Node`.
    pub(crate) const fn leaf(model: C, depth: usize, cardinality: usize) -> Self {
        Self::new(model, depth, cardinality, (0, 0))
    }

    /// Returns the trained flat clustering model.
    #[must_use]
    pub const fn model(&self) -> &C {
        &self.model
    }

    /// Returns the depth of the node. The root is at depth 0.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of points the node was trained on.
    #[must_use]
    pub const fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Returns the number of clusters the node was trained with.
    #[must_use]
    pub fn branching(&self) -> usize {
        self.model.branching()
    }

    /// Returns the range of arena indices holding the children of the node.
    ///
    /// The range is empty for leaves.
    #[must_use]
    pub const fn children(&self) -> Range<usize> {
        self.children.0..self.children.1
    }

    /// Returns the number of children of the node.
    #[must_use]
    pub const fn n_children(&self) -> usize {
        self.children.1 - self.children.0
    }

    /// Whether the node has no children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.children.0 == self.children.1
    }

    /// Returns the arena index of the child for the given cluster label.
    #[must_use]
    pub const fn child(&self, label: usize) -> Option<usize> {
        let index = self.children.0 + label;
        if index < self.children.1 {
            Some(index)
        } else {
            None
        }
    }
}
