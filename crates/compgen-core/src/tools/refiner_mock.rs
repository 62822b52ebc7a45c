//! Mock refiner for testing.
//!
//! This module provides a mock implementation of the `Refiner` trait. The mock
//! returns pre-programmed replies and records every piece of code it was asked
//! to refine.

use crate::tools::refiner::{Refiner, ServiceError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Pre-programmed reply of the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MockReply {
    Text(String),
    Status(u16, String),
}

/// Mock refiner for testing.
///
/// Queued replies are consumed in order. With the queue empty the mock echoes
/// its input back, trimmed, which models a service that found nothing to fix.
///
/// # Examples
///
/// ```
/// use compgen_core::tools::refiner::Refiner;
/// use compgen_core::tools::refiner_mock::MockRefiner;
///
/// # tokio_test_block(async {
/// let refiner = MockRefiner::new();
/// refiner.push_text("  fixed  ");
///
/// assert_eq!(refiner.refine("broken").await.unwrap(), "fixed");
/// assert_eq!(refiner.refine("kept").await.unwrap(), "kept");
/// assert_eq!(refiner.get_history(), vec!["broken", "kept"]);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRefiner {
    /// Replies to hand out, front first.
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Inputs received, in call order.
    history: Arc<Mutex<Vec<String>>>,
}

impl MockRefiner {
    /// Creates a mock that echoes its input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose first call answers with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        let refiner = Self::new();
        refiner.push_text(text);
        refiner
    }

    /// Creates a mock whose first call fails with an HTTP status.
    pub fn with_failure(status: u16, body: impl Into<String>) -> Self {
        let refiner = Self::new();
        refiner.push_failure(status, body);
        refiner
    }

    /// Queues a successful reply.
    pub fn push_text(&self, text: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Text(text.into()));
    }

    /// Queues a `ServiceError::Status` failure.
    pub fn push_failure(&self, status: u16, body: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Status(status, body.into()));
    }

    /// Returns the inputs received so far.
    pub fn get_history(&self) -> Vec<String> {
        self.history.lock().unwrap().clone()
    }

    /// Returns the number of refine calls made.
    pub fn call_count(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    /// Clears queued replies and history.
    pub fn clear(&self) {
        self.replies.lock().unwrap().clear();
        self.history.lock().unwrap().clear();
    }
}

#[async_trait]
impl Refiner for MockRefiner {
    async fn refine(&self, code: &str) -> Result<String, ServiceError> {
        self.history.lock().unwrap().push(code.to_string());

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(text.trim().to_string()),
            Some(MockReply::Status(status, body)) => Err(ServiceError::Status { status, body }),
            None => Ok(code.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echoes_by_default() {
        let refiner = MockRefiner::new();
        let output = refiner.refine("\n  code\n").await.unwrap();
        assert_eq!(output, "code");
    }

    #[tokio::test]
    async fn test_mock_replies_in_order() {
        let refiner = MockRefiner::new();
        refiner.push_text("first");
        refiner.push_failure(500, "boom");

        assert_eq!(refiner.refine("a").await.unwrap(), "first");

        match refiner.refine("b").await {
            Err(ServiceError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status failure, got {other:?}"),
        }

        assert_eq!(refiner.refine("c").await.unwrap(), "c");
    }

    #[tokio::test]
    async fn test_mock_history_and_clear() {
        let refiner = MockRefiner::with_text("x");
        refiner.refine("one").await.unwrap();
        refiner.refine("two").await.unwrap();

        assert_eq!(refiner.call_count(), 2);
        assert_eq!(refiner.get_history(), vec!["one", "two"]);

        refiner.clear();
        assert_eq!(refiner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let refiner = MockRefiner::new();
        let handle = refiner.clone();

        refiner.refine("shared").await.unwrap();
        assert_eq!(handle.get_history(), vec!["shared"]);
    }
}
