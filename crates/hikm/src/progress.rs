//! Progress notifications emitted while a `Tree` is being trained.

/// A sink for progress notifications.
///
/// After the subtree under child `k` of a node at `level` is finished, the
/// builder reports `(level, (k + 1) / branching * 100)`. Notifications are
/// purely observational.
pub trait Progress {
    /// Receives a notification.
    ///
    /// # Arguments
    ///
    /// * `level` - The depth of the node whose child was finished. The root is
    ///   at level 0.
    /// * `percent` - The percentage of that node's children finished so far.
    fn notify(&mut self, level: usize, percent: f64);
}

/// Ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {
    fn notify(&mut self, _: usize, _: f64) {}
}

/// Writes notifications to the log at the `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn notify(&mut self, level: usize, percent: f64) {
        ftlog::info!("hikmeans: branch at depth {level}: {percent:6.1} % completed");
    }
}

impl<F: FnMut(usize, f64)> Progress for F {
    fn notify(&mut self, level: usize, percent: f64) {
        self(level, percent);
    }
}
