//! Per-view teardown signal.
//!
//! A view that issues requests and may go away before they complete runs them
//! inside its [`ViewScope`]. Once the scope is torn down, late results are
//! discarded. The request itself is not cancelled server-side; only its effect
//! on the view is suppressed.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct ViewScope {
    torn_down: Arc<watch::Sender<bool>>,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewScope {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            torn_down: Arc::new(tx),
        }
    }

    /// Signal teardown. Idempotent.
    pub fn teardown(&self) {
        self.torn_down.send_replace(true);
    }

    pub fn is_torn_down(&self) -> bool {
        *self.torn_down.borrow()
    }

    /// Drive `fut` unless the scope is torn down first.
    ///
    /// Returns `None` when the result arrived after (or raced with) teardown.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let mut rx = self.torn_down.subscribe();
        if *rx.borrow_and_update() {
            return None;
        }

        let teardown = async {
            loop {
                if rx.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
                if *rx.borrow_and_update() {
                    break;
                }
            }
        };

        tokio::select! {
            biased;
            _ = teardown => None,
            out = fut => {
                if self.is_torn_down() { None } else { Some(out) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_live_scope_yields_result() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_torn_down_scope_discards() {
        let scope = ViewScope::new();
        scope.teardown();
        assert_eq!(scope.run(async { 7 }).await, None);
        assert!(scope.is_torn_down());
    }

    #[tokio::test]
    async fn test_teardown_while_pending() {
        let scope = ViewScope::new();
        let view = scope.clone();

        let pending = tokio::spawn(async move {
            view.run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "late"
            })
            .await
        });

        tokio::task::yield_now().await;
        scope.teardown();

        let result = tokio::time::timeout(Duration::from_secs(5), pending)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let scope = ViewScope::default();
        scope.teardown();
        scope.teardown();
        assert!(scope.is_torn_down());
        assert_eq!(tokio_test::block_on(scope.run(async { 1 })), None);
    }
}
