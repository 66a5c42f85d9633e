//! Tests for building and querying a `Tree`.

use hikm::{Method, Silent, State, Tree};
use test_case::test_case;

mod common;

fn trained(method: Method, data: &[u8], dims: usize, k: usize, depth: usize, seed: u64) -> Tree {
    let mut tree = Tree::new(method).with_seed(Some(seed));
    tree.configure(dims, k, depth).unwrap();
    tree.train_with_progress(data, &mut Silent).unwrap();
    tree
}

#[test_case(Method::Lloyd ; "lloyd")]
#[test_case(Method::Elkan ; "elkan")]
fn two_pairs(method: Method) {
    let data = common::data_gen::two_pairs();
    let tree = trained(method, &data, 2, 2, 2, 42);

    assert_eq!(tree.state(), State::Trained);
    assert_eq!(tree.n_nodes(), 3);
    common::tree::check_structure(&tree, 4);
    common::tree::check_training_paths(&tree, &data);

    for child in tree.children_of(0) {
        assert_eq!(child.cardinality(), 2);
        assert_eq!(child.branching(), 2);
        assert!(child.is_leaf());
    }

    let paths = tree.assign(&data).unwrap();
    assert_eq!(paths[0][0], paths[1][0]);
    assert_eq!(paths[2][0], paths[3][0]);
    assert_ne!(paths[0][0], paths[2][0]);
    assert_ne!(paths[0][1], paths[1][1]);
    assert_ne!(paths[2][1], paths[3][1]);

    assert_eq!(tree.path_of(&[0, 0]).unwrap(), paths[0]);

    // An unseen point goes to the nearer root cluster, then to the nearer leaf
    // cluster within it.
    let unseen = tree.path_of(&[0, 2]).unwrap();
    assert_eq!(unseen, paths[1]);
}

#[test_case(200, 4, 3, 3 ; "200x4 k3 d3")]
#[test_case(500, 8, 4, 4 ; "500x8 k4 d4")]
#[test_case(1_000, 16, 10, 2 ; "1000x16 k10 d2")]
fn uniform_data(car: usize, dims: usize, k: usize, depth: usize) {
    let data = common::data_gen::uniform(car, dims, 42);
    for &method in Method::variants() {
        let tree = trained(method, &data, dims, k, depth, 7);
        common::tree::check_structure(&tree, car);
        common::tree::check_training_paths(&tree, &data);
    }
}

#[test_case(8, 25, 6, 2, 3 ; "8 blobs k2 d3")]
#[test_case(4, 50, 3, 4, 2 ; "4 blobs k4 d2")]
fn blob_data(n_blobs: usize, per_blob: usize, dims: usize, k: usize, depth: usize) {
    let data = common::data_gen::blobs(n_blobs, per_blob, dims, 42);
    for &method in Method::variants() {
        let tree = trained(method, &data, dims, k, depth, 3);
        common::tree::check_structure(&tree, n_blobs * per_blob);
        common::tree::check_training_paths(&tree, &data);
    }
}

#[test]
fn branching_is_clamped() {
    let data = vec![10, 20, 200];
    let tree = trained(Method::Lloyd, &data, 1, 8, 3, 42);

    let root = tree.root().unwrap();
    assert_eq!(root.branching(), 3);
    assert_eq!(root.n_children(), 3);
    for child in tree.children_of(0) {
        assert_eq!(child.cardinality(), 1);
        assert_eq!(child.branching(), 1);
        assert_eq!(child.n_children(), 1);
    }
    assert_eq!(tree.n_nodes(), 1 + 3 + 3);
    assert_eq!(tree.leaves().count(), 3);
    assert!(tree.leaves().all(|leaf| leaf.depth() == 2));

    let paths = tree.assign(&data).unwrap();
    assert!(paths.iter().all(|p| p.len() == 3 && p[1] == 0 && p[2] == 0));
    common::tree::check_structure(&tree, 3);
    common::tree::check_training_paths(&tree, &data);
}

#[test]
fn single_level() {
    let data = common::data_gen::uniform(50, 3, 1);
    let tree = trained(Method::Elkan, &data, 3, 5, 1, 1);

    assert_eq!(tree.n_nodes(), 1);
    assert!(tree.root().unwrap().is_leaf());
    assert!(tree.children_of(0).is_empty());

    let paths = tree.assign(&data).unwrap();
    assert!(paths.iter().all(|p| p.len() == 1 && p[0] < 5));
    common::tree::check_training_paths(&tree, &data);
}

#[test]
fn assignment_is_deterministic() {
    let dims = 6;
    let data = common::data_gen::uniform(400, dims, 11);
    let tree = trained(Method::Lloyd, &data, dims, 4, 3, 11);

    let first = tree.assign(&data).unwrap();
    let second = tree.assign(&data).unwrap();
    assert_eq!(first, second);

    let par = tree.par_assign(&data).unwrap();
    assert_eq!(first, par);

    let reversed = data.chunks_exact(dims).rev().flatten().copied().collect::<Vec<_>>();
    let mut reversed_paths = tree.assign(&reversed).unwrap();
    reversed_paths.reverse();
    assert_eq!(first, reversed_paths);

    for (x, path) in data.chunks_exact(dims).zip(&first) {
        assert_eq!(&tree.path_of(x).unwrap(), path);
    }

    let queries = common::data_gen::uniform(100, dims, 12);
    assert_eq!(tree.assign(&queries).unwrap(), tree.par_assign(&queries).unwrap());
}

#[test]
fn same_seed_same_tree() {
    let dims = 4;
    let data = common::data_gen::uniform(300, dims, 5);
    let a = trained(Method::Lloyd, &data, dims, 3, 3, 99);
    let b = trained(Method::Lloyd, &data, dims, 3, 3, 99);

    assert_eq!(a.n_nodes(), b.n_nodes());
    for (x, y) in a.nodes().iter().zip(b.nodes()) {
        assert_eq!(x.model().centers(), y.model().centers());
        assert_eq!(x.children(), y.children());
    }
}

#[test]
fn progress_notifications() {
    let dims = 2;
    let data = common::data_gen::uniform(100, dims, 3);

    let mut tree = Tree::new(Method::Lloyd).with_seed(Some(3)).with_verbosity(1);
    tree.configure(dims, 3, 3).unwrap();

    let mut seen = Vec::new();
    let mut record = |level: usize, percent: f64| seen.push((level, percent));
    tree.train_with_progress(&data, &mut record).unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|&(level, _)| level == 0));
    assert!((seen[2].1 - 100.).abs() < 1e-9);

    tree.set_verbosity(10);
    let mut seen = Vec::new();
    let mut record = |level: usize, percent: f64| seen.push((level, percent));
    tree.train_with_progress(&data, &mut record).unwrap();
    // One notification per finished child.
    assert_eq!(seen.len(), tree.n_nodes() - 1);
    assert_eq!(seen.last().map(|&(level, _)| level), Some(0));
    let level_one = tree.children_of(0).iter().map(hikm::Node::n_children).sum::<usize>();
    assert_eq!(seen.iter().filter(|&&(level, _)| level == 1).count(), level_one);

    tree.set_verbosity(0);
    let mut seen = Vec::new();
    let mut record = |level: usize, percent: f64| seen.push((level, percent));
    tree.train_with_progress(&data, &mut record).unwrap();
    assert!(seen.is_empty());
}

#[test]
fn lifecycle() {
    let mut tree = Tree::new(Method::Lloyd);
    assert_eq!(tree.state(), State::New);
    assert_eq!(tree.max_iters(), 200);
    assert_eq!(tree.verbosity(), 0);
    assert_eq!((tree.dims(), tree.branching(), tree.depth()), (0, 0, 0));
    assert!(tree.root().is_none());

    let data = common::data_gen::uniform(60, 2, 8);
    assert!(tree.train(&data).is_err());

    tree.configure(2, 3, 2).unwrap();
    assert_eq!(tree.state(), State::Configured);
    assert!(tree.assign(&data).is_err());

    tree.train(&data).unwrap();
    assert_eq!(tree.state(), State::Trained);
    let first = tree.n_nodes();
    assert!(first > 1);

    // Retraining replaces the previous nodes.
    tree.train(&data[..40]).unwrap();
    assert_eq!(tree.state(), State::Trained);
    assert_eq!(tree.root().unwrap().cardinality(), 20);

    // Reconfiguring releases the nodes.
    tree.configure(2, 2, 3).unwrap();
    assert_eq!(tree.state(), State::Configured);
    assert_eq!(tree.n_nodes(), 0);

    tree.train(&data).unwrap();
    tree.clear();
    assert_eq!(tree.state(), State::Configured);
}

#[test]
fn invalid_inputs() {
    let mut tree = Tree::new(Method::Elkan);
    assert!(tree.configure(0, 2, 2).is_err());
    assert!(tree.configure(2, 0, 2).is_err());
    assert!(tree.configure(2, 2, 0).is_err());
    assert_eq!(tree.state(), State::New);

    tree.configure(3, 2, 2).unwrap();
    assert!(tree.train(&[]).is_err());
    assert!(tree.train(&[1, 2, 3, 4]).is_err());

    tree.train(&[1, 2, 3, 4, 5, 6]).unwrap();
    assert!(tree.assign(&[1, 2]).is_err());
    assert!(tree.path_of(&[1, 2, 3, 4, 5, 6]).is_err());
    assert!(tree.path_of(&[1, 2, 3]).is_ok());
    assert!(tree.assign(&[]).unwrap().is_empty());
}
