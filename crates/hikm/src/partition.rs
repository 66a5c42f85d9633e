//! Splitting a dataset by cluster label.

/// Copies the points with the given label into a new contiguous buffer.
///
/// The points keep their original relative order.
///
/// # Arguments
///
/// * `data` - The flat buffer of points.
/// * `labels` - The label of every point in `data`.
/// * `dims` - The dimensionality of the points.
/// * `label` - The label of the points to copy.
///
/// # Returns
///
/// The buffer holding the selected points and the number of points in it.
/// If no point has the label, the buffer is empty and the count is zero.
#[must_use]
pub fn copy_subset(data: &[u8], labels: &[usize], dims: usize, label: usize) -> (Vec<u8>, usize) {
    let count = labels.iter().filter(|&&l| l == label).count();

    let mut subset = Vec::with_capacity(count * dims);
    for (x, _) in data.chunks_exact(dims).zip(labels).filter(|&(_, &l)| l == label) {
        subset.extend_from_slice(x);
    }

    (subset, count)
}

/// Counts the number of points with each label in `0..k`.
///
/// Labels outside `0..k` are ignored.
#[must_use]
pub fn count_labels(labels: &[usize], k: usize) -> Vec<usize> {
    let mut counts = vec![0; k];
    for &l in labels {
        if let Some(c) = counts.get_mut(l) {
            *c += 1;
        }
    }
    counts
}
