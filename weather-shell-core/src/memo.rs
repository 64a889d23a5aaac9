use std::future::Future;

use tokio::sync::OnceCell;

/// Compute-once value: populated by the first successful computation and
/// reused for the rest of the process lifetime. A failed computation leaves
/// the memo empty, so the next caller retries.
///
/// Concurrent callers wait on the in-flight computation instead of starting
/// their own.
#[derive(Debug)]
pub struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self { cell: OnceCell::new() }
    }
}

impl<T: Clone> Memo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<T> {
        self.cell.get().cloned()
    }

    pub async fn get_or_try_compute<F, Fut, E>(&self, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell.get_or_try_init(compute).await.cloned()
    }
}
