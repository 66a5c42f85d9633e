//! Checks of the structural invariants of a trained `Tree`.

use hikm::{FlatClusterer, Tree};

/// Follows `path` from the root and returns the arena index of the node
/// where it ends.
pub fn leaf_of<C: FlatClusterer>(tree: &Tree<C>, path: &[usize]) -> usize {
    let mut index = 0;
    for &label in path {
        match tree.node(index).unwrap().child(label) {
            Some(i) => index = i,
            None => break,
        }
    }
    index
}

/// Checks the branching, depth and cardinality invariants of every node.
pub fn check_structure<C: FlatClusterer>(tree: &Tree<C>, n: usize) {
    let root = tree.root().unwrap();
    assert_eq!(root.depth(), 0);
    assert_eq!(root.cardinality(), n);
    assert_eq!(root.branching(), tree.branching().min(n));

    for (i, node) in tree.nodes().iter().enumerate() {
        let children = tree.children_of(i);
        assert_eq!(children.len(), node.n_children());

        if node.is_leaf() {
            if node.cardinality() > 0 {
                assert_eq!(node.depth(), tree.depth() - 1, "populated leaf {i} is not at the last level");
            }
            continue;
        }

        assert_eq!(node.n_children(), node.branching(), "node {i} has the wrong number of children");
        assert!(node.depth() < tree.depth() - 1);

        let car_sum = children.iter().map(hikm::Node::cardinality).sum::<usize>();
        assert_eq!(car_sum, node.cardinality());

        for child in children {
            assert_eq!(child.depth(), node.depth() + 1);
            assert_eq!(child.branching(), node.branching().min(child.cardinality()));
        }
    }
}

/// Checks that the paths of the training points lead to the leaves that were
/// trained on them.
pub fn check_training_paths<C: FlatClusterer>(tree: &Tree<C>, data: &[u8]) {
    let paths = tree.assign(data).unwrap();
    assert!(paths.iter().all(|p| p.len() == tree.depth()));

    let mut arrivals = vec![0; tree.n_nodes()];
    for path in &paths {
        let index = leaf_of(tree, path);
        assert!(tree.node(index).unwrap().is_leaf());
        arrivals[index] += 1;
    }

    for (i, node) in tree.nodes().iter().enumerate() {
        if node.is_leaf() {
            assert_eq!(arrivals[i], node.cardinality(), "leaf {i}");
        }
    }
}
