//! Application startup and lifecycle management.

use crate::config::AlertConfig;
use crate::handlers::{
    health_check, metrics_endpoint, readiness_check, send_emergency, send_update,
};
use crate::services::{
    AlertDispatcher, ExpoPushProvider, MockPushProvider, PushProvider, RecipientRegistry,
};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, track_requests};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. The registry and dispatcher are immutable
/// after construction; request handling only reads them.
#[derive(Clone)]
pub struct AppState {
    pub config: AlertConfig,
    pub registry: Arc<RecipientRegistry>,
    pub dispatcher: Arc<AlertDispatcher>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Binding to port 0 picks a random free port, which the integration
    /// tests rely on.
    pub async fn build(config: AlertConfig) -> Result<Self, AppError> {
        let registry = Arc::new(RecipientRegistry::new(config.recipients.clone()));
        tracing::info!(recipients = registry.len(), "recipient registry loaded");

        let provider: Arc<dyn PushProvider> = if config.expo.enabled {
            let provider = ExpoPushProvider::new(config.expo.clone())
                .map_err(|e| AppError::Config(anyhow::anyhow!(e.to_string())))?;
            tracing::info!(endpoint = %config.expo.endpoint, "Expo push provider initialized");
            Arc::new(provider)
        } else {
            tracing::info!("Expo provider disabled, using mock push provider");
            Arc::new(MockPushProvider::new())
        };

        let dispatcher = Arc::new(AlertDispatcher::new(provider));

        let state = AppState {
            config: config.clone(),
            registry,
            dispatcher,
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("alert service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped or a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/send-update", post(send_update))
        .route("/send-emergency", post(send_emergency))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .layer(from_fn(track_requests))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
