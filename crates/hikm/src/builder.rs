//! Depth-first construction of the node arena of a `Tree`.

use std::borrow::Cow;

use ikm::FlatClusterer;

use crate::{partition, Node, Progress};

/// The tree-wide settings used to train every node.
pub(crate) struct Params<M> {
    /// The dimensionality of the data.
    pub dims: usize,
    /// The depth of the tree.
    pub depth: usize,
    /// The method used by the flat clustering engine.
    pub method: M,
    /// The maximum number of training iterations per node.
    pub max_iters: usize,
    /// The verbosity level of the tree.
    pub verbosity: usize,
    /// An optional seed for random number generation.
    pub seed: Option<u64>,
}

/// A node whose children are still being built.
struct Frame<'a> {
    /// The points the node was trained on.
    data: Cow<'a, [u8]>,
    /// The label of every point in `data`.
    labels: Vec<usize>,
    /// The number of clusters of the node.
    branching: usize,
    /// The number of levels, including the node's own, left to build.
    height: usize,
    /// The arena index of the first child of the node.
    first_child: usize,
    /// The label of the next child to build.
    next: usize,
}

impl Frame<'_> {
    /// The depth of the node in the tree.
    const fn level(&self, depth: usize) -> usize {
        depth - self.height
    }
}

/// Builds the node arena for `data`, with `k` clusters at the root.
///
/// Children are built depth-first, in ascending label order. Every frame on
/// the stack owns the subset of points of its node, so at most one subset
/// per level is alive at any time. The root frame borrows `data`.
///
/// # Errors
///
/// Any error from the flat clustering engine is propagated.
pub(crate) fn build<C: FlatClusterer, P: Progress>(
    params: &Params<C::Method>,
    data: &[u8],
    k: usize,
    progress: &mut P,
) -> Result<Vec<Node<C>>, String> {
    let n = data.len() / params.dims;

    let mut slots: Vec<Option<Node<C>>> = vec![None];
    let mut stack: Vec<Frame> = Vec::with_capacity(params.depth);

    let (model, labels) = train_node::<C>(params, data, n, k, params.depth, 0)?;
    place(&mut slots, &mut stack, 0, model, Cow::Borrowed(data), labels, params);

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.branching {
            stack.pop();
            if let Some(parent) = stack.last() {
                notify(progress, params, parent, parent.next - 1);
            }
            continue;
        }

        let label = frame.next;
        frame.next += 1;

        let (subset, n_k) = partition::copy_subset(&frame.data, &frame.labels, params.dims, label);
        let k = frame.branching.min(n_k);
        let height = frame.height - 1;
        let slot = frame.first_child + label;

        let (model, labels) = train_node::<C>(params, &subset, n_k, k, height, slot)?;
        if !place(&mut slots, &mut stack, slot, model, Cow::Owned(subset), labels, params) {
            if let Some(parent) = stack.last() {
                notify(progress, params, parent, label);
            }
        }
    }

    let nodes = slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| unreachable!("Every reserved slot is filled before the stack empties.")))
        .collect::<Vec<_>>();

    Ok(nodes)
}

/// Trains the flat clustering model of a node.
///
/// The labels of the points are only computed when the node will have
/// children, i.e. when `height > 1`.
fn train_node<C: FlatClusterer>(
    params: &Params<C::Method>,
    data: &[u8],
    n: usize,
    k: usize,
    height: usize,
    slot: usize,
) -> Result<(C, Vec<usize>), String> {
    let mut model = C::new(params.method);
    model.set_max_iters(params.max_iters);
    model.set_verbosity(params.verbosity.saturating_sub(1));
    model.seed_from_data(data, params.dims, n, k, params.seed.map(|s| s.wrapping_add(slot as u64)))?;
    model.train(data)?;

    let level = params.depth - height;
    if height > 1 {
        let labels = model.assign_batch(data);
        ftlog::debug!(
            "hikmeans: trained node {slot} at depth {level} on {n} points with cluster sizes {:?}",
            partition::count_labels(&labels, model.branching())
        );
        Ok((model, labels))
    } else {
        ftlog::debug!(
            "hikmeans: trained leaf {slot} at depth {level} on {n} points with {} clusters",
            model.branching()
        );
        Ok((model, Vec::new()))
    }
}

/// Stores a trained node in its slot of the arena.
///
/// If the node needs children, their slots are reserved at the end of the
/// arena and a frame for the node is pushed onto the stack. Nodes at the last
/// level and nodes trained with no clusters are stored as leaves.
///
/// Returns whether a frame was pushed.
fn place<'a, C: FlatClusterer, M>(
    slots: &mut Vec<Option<Node<C>>>,
    stack: &mut Vec<Frame<'a>>,
    slot: usize,
    model: C,
    data: Cow<'a, [u8]>,
    labels: Vec<usize>,
    params: &Params<M>,
) -> bool {
    let height = params.depth - stack.len();
    let depth = params.depth - height;
    let cardinality = data.len() / params.dims;
    let branching = model.branching();

    if height == 1 || branching == 0 {
        slots[slot] = Some(Node::leaf(model, depth, cardinality));
        return false;
    }

    let first_child = slots.len();
    slots.resize_with(first_child + branching, || None);
    slots[slot] = Some(Node::new(model, depth, cardinality, (first_child, first_child + branching)));
    stack.push(Frame {
        data,
        labels,
        branching,
        height,
        first_child,
        next: 0,
    });

    true
}

/// Sends a notification for child `label` of the node of `frame`, if the
/// verbosity reaches the level of that node.
fn notify<P: Progress, M>(progress: &mut P, params: &Params<M>, frame: &Frame, label: usize) {
    let level = frame.level(params.depth);
    if params.verbosity > level {
        #[allow(clippy::cast_precision_loss)]
        let percent = (label + 1) as f64 / frame.branching as f64 * 100.;
        progress.notify(level, percent);
    }
}
