pub mod expo;

use crate::models::PushMessage;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

pub use expo::ExpoPushProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    /// The provider answered but reported a delivery failure, either via a
    /// non-success status or an `errors` field in an otherwise OK response.
    #[error("{0}")]
    Rejected(String),

    #[error("Failed to parse provider response: {0}")]
    MalformedResponse(String),
}

/// Outbound seam to the push delivery API.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Submits one envelope and returns the provider's parsed response body.
    async fn send(&self, message: &PushMessage) -> Result<Value, ProviderError>;

    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Short provider label for logs and metrics.
    fn name(&self) -> &'static str;
}

/// Mock push provider for tests and disabled-provider configurations.
pub struct MockPushProvider {
    send_count: AtomicU64,
    last_message: Mutex<Option<PushMessage>>,
}

impl MockPushProvider {
    pub fn new() -> Self {
        Self {
            send_count: AtomicU64::new(0),
            last_message: Mutex::new(None),
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn last_message(&self) -> Option<PushMessage> {
        self.last_message
            .lock()
            .expect("mock provider lock poisoned")
            .clone()
    }
}

impl Default for MockPushProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushProvider for MockPushProvider {
    async fn send(&self, message: &PushMessage) -> Result<Value, ProviderError> {
        let n = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;
        *self
            .last_message
            .lock()
            .expect("mock provider lock poisoned") = Some(message.clone());

        tracing::info!(
            to = %message.to,
            title = message.title,
            "[MOCK] push notification would be sent"
        );

        Ok(json!({
            "data": { "status": "ok", "id": format!("mock-push-{}", n) }
        }))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
