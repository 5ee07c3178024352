//! Process lifecycle shared by long-running operations.
//!
//! A [`Lifecycle`] is a cloneable handle over a single phase value. It moves
//! one way only: `Running -> ShuttingDown -> Terminated`. Operations check it
//! at their suspension points instead of reading a global flag.

use std::sync::Arc;

use tokio::sync::watch;

/// Phase of the process lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Running,
    ShuttingDown,
    Terminated,
}

/// Cloneable lifecycle handle
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Arc<watch::Sender<LifecyclePhase>>,
}

impl Lifecycle {
    /// Create a lifecycle in the `Running` phase
    pub fn new() -> Self {
        let (phase, _) = watch::channel(LifecyclePhase::Running);
        Self {
            phase: Arc::new(phase),
        }
    }

    /// Current phase
    pub fn phase(&self) -> LifecyclePhase {
        *self.phase.borrow()
    }

    /// Whether a shutdown has been requested
    pub fn is_shutting_down(&self) -> bool {
        self.phase() != LifecyclePhase::Running
    }

    /// Request shutdown.
    ///
    /// Returns `true` for the caller that moved the lifecycle out of
    /// `Running`, and `false` for every later call.
    pub fn begin_shutdown(&self) -> bool {
        self.phase.send_if_modified(|phase| {
            if *phase == LifecyclePhase::Running {
                *phase = LifecyclePhase::ShuttingDown;
                true
            } else {
                false
            }
        })
    }

    /// Mark the shutdown sequence as finished
    pub fn mark_terminated(&self) {
        self.phase.send_if_modified(|phase| {
            if *phase == LifecyclePhase::Terminated {
                false
            } else {
                *phase = LifecyclePhase::Terminated;
                true
            }
        });
    }

    /// Suspend until shutdown has been requested.
    ///
    /// Returns immediately if it already has been.
    pub async fn wait_for_shutdown(&self) {
        let mut rx = self.phase.subscribe();
        // The sender lives as long as `self`, so this never sees a closed channel.
        let _ = rx.wait_for(|phase| *phase != LifecyclePhase::Running).await;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_lifecycle_is_running() {
        // テスト項目: 作成直後は Running
        let lifecycle = Lifecycle::new();

        assert_eq!(lifecycle.phase(), LifecyclePhase::Running);
        assert!(!lifecycle.is_shutting_down());
    }

    #[test]
    fn test_begin_shutdown_is_idempotent() {
        // テスト項目: shutdown 要求は最初の1回だけが有効
        // given (前提条件):
        let lifecycle = Lifecycle::new();
        let other = lifecycle.clone();

        // when (操作):
        let first = lifecycle.begin_shutdown();
        let second = other.begin_shutdown();

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(lifecycle.phase(), LifecyclePhase::ShuttingDown);
    }

    #[test]
    fn test_terminated_is_final() {
        // テスト項目: Terminated の後に shutdown を要求しても状態は戻らない
        // given (前提条件):
        let lifecycle = Lifecycle::new();
        lifecycle.begin_shutdown();

        // when (操作):
        lifecycle.mark_terminated();
        let started = lifecycle.begin_shutdown();

        // then (期待する結果):
        assert!(!started);
        assert_eq!(lifecycle.phase(), LifecyclePhase::Terminated);
        assert!(lifecycle.is_shutting_down());
    }

    #[tokio::test]
    async fn test_wait_for_shutdown_wakes_on_request() {
        // テスト項目: 別タスクの shutdown 要求で待機が解除される
        // given (前提条件):
        let lifecycle = Lifecycle::new();
        let waiter = {
            let lifecycle = lifecycle.clone();
            tokio::spawn(async move { lifecycle.wait_for_shutdown().await })
        };

        // when (操作):
        lifecycle.begin_shutdown();

        // then (期待する結果):
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake up")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_shutdown_returns_immediately_when_already_requested() {
        // テスト項目: shutdown 済みなら即座に返る
        let lifecycle = Lifecycle::new();
        lifecycle.begin_shutdown();

        tokio::time::timeout(Duration::from_millis(100), lifecycle.wait_for_shutdown())
            .await
            .expect("should not block");
    }
}
