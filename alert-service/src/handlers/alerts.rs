use crate::models::{AlertKind, PatientReport, RecipientId};
use crate::services::RecipientRegistry;
use crate::startup::AppState;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SendAlertRequest {
    #[serde(default, rename = "recipientId")]
    pub recipient_id: Option<RecipientId>,
    #[serde(default)]
    pub data: Option<PatientReport>,
}

#[derive(Debug, Serialize)]
pub struct SendAlertResponse {
    pub success: bool,
    pub result: Value,
}

#[tracing::instrument(skip(state, request))]
pub async fn send_update(
    State(state): State<AppState>,
    Json(request): Json<SendAlertRequest>,
) -> Result<Json<SendAlertResponse>, AppError> {
    send_alert(&state, request, AlertKind::Update).await
}

#[tracing::instrument(skip(state, request))]
pub async fn send_emergency(
    State(state): State<AppState>,
    Json(request): Json<SendAlertRequest>,
) -> Result<Json<SendAlertResponse>, AppError> {
    send_alert(&state, request, AlertKind::Emergency).await
}

/// Shared path for both alert kinds. Validation must stay identical for the
/// two routes; only the envelope construction differs, and that lives on
/// `AlertKind`.
async fn send_alert(
    state: &AppState,
    request: SendAlertRequest,
    kind: AlertKind,
) -> Result<Json<SendAlertResponse>, AppError> {
    let (token, report) = resolve_recipient(&state.registry, request)?;

    match state.dispatcher.dispatch(token, kind, &report).await {
        Ok(result) => {
            tracing::info!(kind = %kind, "alert delivered");
            Ok(Json(SendAlertResponse {
                success: true,
                result,
            }))
        }
        Err(e) => {
            tracing::error!(kind = %kind, error = %e, "alert dispatch failed");
            Err(AppError::Internal(anyhow::anyhow!(e.to_string())))
        }
    }
}

fn resolve_recipient(
    registry: &RecipientRegistry,
    request: SendAlertRequest,
) -> Result<(String, PatientReport), AppError> {
    let recipient_id = match request.recipient_id {
        Some(id) if !id.is_blank() => id,
        _ => {
            return Err(AppError::BadRequest(
                "Missing recipientId or data".to_string(),
            ));
        }
    };

    let Some(report) = request.data else {
        return Err(AppError::BadRequest(
            "Missing recipientId or data".to_string(),
        ));
    };

    let token = registry
        .token_for(&recipient_id)
        .ok_or_else(|| AppError::NotFound("Recipient token not found".to_string()))?
        .to_string();

    Ok((token, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn registry() -> RecipientRegistry {
        RecipientRegistry::new(HashMap::from([(
            "12345".to_string(),
            "ExponentPushToken[abc]".to_string(),
        )]))
    }

    fn request(recipient_id: Option<RecipientId>, data: Option<PatientReport>) -> SendAlertRequest {
        SendAlertRequest { recipient_id, data }
    }

    #[test]
    fn absent_recipient_id_is_a_bad_request() {
        let err = resolve_recipient(&registry(), request(None, Some(PatientReport::default())))
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn blank_recipient_id_is_a_bad_request() {
        let err = resolve_recipient(
            &registry(),
            request(
                Some(RecipientId::Str("  ".to_string())),
                Some(PatientReport::default()),
            ),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn zero_recipient_id_is_a_bad_request() {
        let err = resolve_recipient(
            &registry(),
            request(Some(RecipientId::Int(0)), Some(PatientReport::default())),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn absent_data_is_a_bad_request() {
        let err =
            resolve_recipient(&registry(), request(Some(RecipientId::Int(12345)), None))
                .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn unregistered_recipient_is_not_found() {
        let err = resolve_recipient(
            &registry(),
            request(Some(RecipientId::Int(99999)), Some(PatientReport::default())),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn numeric_id_resolves_against_string_key() {
        let (token, _) = resolve_recipient(
            &registry(),
            request(Some(RecipientId::Int(12345)), Some(PatientReport::default())),
        )
        .unwrap();
        assert_eq!(token, "ExponentPushToken[abc]");
    }
}
