use super::{ProviderError, PushProvider};
use crate::config::ExpoConfig;
use crate::models::PushMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Push provider backed by the Expo push HTTP API.
pub struct ExpoPushProvider {
    config: ExpoConfig,
    client: Client,
}

impl ExpoPushProvider {
    /// The outbound client carries a bounded request timeout so a stalled
    /// provider cannot pin a request forever.
    pub fn new(config: ExpoConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                ProviderError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Applies the provider response contract to a (status, body) pair.
    ///
    /// The body is read as text before parsing so a non-JSON answer is
    /// reported as a parse failure rather than swallowed. Delivery counts
    /// as rejected on a non-success status or when the parsed body carries
    /// an `errors` field, regardless of the HTTP status.
    fn interpret_response(status: reqwest::StatusCode, text: &str) -> Result<Value, ProviderError> {
        let body: Value = serde_json::from_str(text).map_err(|e| {
            ProviderError::MalformedResponse(format!("{} (body: {})", e, truncate(text, 200)))
        })?;

        if !status.is_success() || body.get("errors").is_some() {
            let detail = match body.get("errors") {
                Some(errors) => errors.to_string(),
                None if body.is_null() => "Unknown error".to_string(),
                None => body.to_string(),
            };
            return Err(ProviderError::Rejected(format!(
                "Expo push failed: {}",
                detail
            )));
        }

        Ok(body)
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl PushProvider for ExpoPushProvider {
    async fn send(&self, message: &PushMessage) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                ProviderError::Connection(format!("Failed to reach push provider: {}", e))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ProviderError::Connection(format!("Failed to read provider response: {}", e))
        })?;

        let body = Self::interpret_response(status, &text)?;

        tracing::info!(to = %message.to, "push notification accepted by Expo");
        Ok(body)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.endpoint.is_empty() {
            return Err(ProviderError::Configuration(
                "Expo push endpoint is not configured".to_string(),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "expo"
    }
}
