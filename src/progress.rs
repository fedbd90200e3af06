// src/progress.rs
/// Lightweight progress reporting used by long-running operations (bulk refresh).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// One series was fetched and recorded.
    fn item_done(&mut self, _identifier: &str, _title: &str) {}

    /// One series could not be fetched; it keeps its previous data.
    fn item_failed(&mut self, _identifier: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
