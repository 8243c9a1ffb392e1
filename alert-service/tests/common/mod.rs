use alert_service::config::{AlertConfig, ExpoConfig};
use alert_service::startup::Application;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TEST_RECIPIENT_ID: &str = "12345";
pub const TEST_TOKEN: &str = "ExponentPushToken[test-token]";

/// Local stand-in for the Expo push API: answers every POST with a canned
/// status and body, recording each envelope it receives.
pub struct StubPushApi {
    pub url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn stub_send(State(state): State<StubState>, Json(request): Json<Value>) -> impl IntoResponse {
    state.requests.lock().unwrap().push(request);
    (
        state.status,
        [("content-type", "application/json")],
        state.body.clone(),
    )
}

impl StubPushApi {
    pub async fn spawn(status: u16, body: &str) -> Self {
        let requests: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status: StatusCode::from_u16(status).expect("invalid stub status"),
            body: body.to_string(),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/push/send", post(stub_send))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let url = format!("http://{}/push/send", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { url, requests }
    }

    /// Envelopes received so far, oldest first.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

pub struct TestApp {
    pub address: String,
    pub push_api: StubPushApi,
}

impl TestApp {
    /// Spawn the service on a random port, pointed at a stub push API that
    /// answers with the given canned status and body.
    pub async fn spawn_with_provider(status: u16, body: &str) -> Self {
        let push_api = StubPushApi::spawn(status, body).await;

        let config = AlertConfig {
            common: CoreConfig { port: 0 },
            expo: ExpoConfig {
                endpoint: push_api.url.clone(),
                request_timeout_secs: 5,
                enabled: true,
            },
            recipients: HashMap::from([(
                TEST_RECIPIENT_ID.to_string(),
                TEST_TOKEN.to_string(),
            )]),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }

        TestApp { address, push_api }
    }

    pub async fn spawn() -> Self {
        Self::spawn_with_provider(200, r#"{"data":{"status":"ok","id":"push-1"}}"#).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
