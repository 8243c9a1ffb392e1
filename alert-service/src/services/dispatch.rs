use crate::models::{AlertKind, PatientReport, PushMessage};
use crate::services::metrics::{record_dispatch, record_provider_call};
use crate::services::providers::{ProviderError, PushProvider};
use serde_json::Value;
use std::sync::Arc;

/// Builds the provider envelope for a resolved alert and submits it.
///
/// One dispatch per request; failures are terminal and surface to the
/// caller unchanged. No retries, no queuing.
pub struct AlertDispatcher {
    provider: Arc<dyn PushProvider>,
}

impl AlertDispatcher {
    pub fn new(provider: Arc<dyn PushProvider>) -> Self {
        Self { provider }
    }

    pub async fn dispatch(
        &self,
        token: String,
        kind: AlertKind,
        report: &PatientReport,
    ) -> Result<Value, ProviderError> {
        let message = PushMessage::for_alert(token, kind, report);

        tracing::debug!(kind = %kind, to = %message.to, body = %message.body, "dispatching alert");

        match self.provider.send(&message).await {
            Ok(result) => {
                record_dispatch(kind, "delivered");
                record_provider_call(self.provider.name(), "ok");
                Ok(result)
            }
            Err(e) => {
                record_dispatch(kind, "failed");
                record_provider_call(self.provider.name(), "error");
                Err(e)
            }
        }
    }

    pub async fn health_check(&self) -> Result<(), ProviderError> {
        self.provider.health_check().await
    }
}
