use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::collections::HashMap;
use std::env;

const DEFAULT_EXPO_ENDPOINT: &str = "https://exp.host/--/api/v2/push/send";

#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub expo: ExpoConfig,
    /// Recipient id to destination token, loaded once at startup. The
    /// intended extension point for a real token store.
    pub recipients: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpoConfig {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub enabled: bool,
}

impl AlertConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(AlertConfig {
            common,
            expo: ExpoConfig {
                endpoint: get_env("EXPO_PUSH_ENDPOINT", Some(DEFAULT_EXPO_ENDPOINT), is_prod)?,
                request_timeout_secs: get_env("EXPO_REQUEST_TIMEOUT_SECS", Some("10"), is_prod)?
                    .parse()
                    .unwrap_or(10),
                enabled: env::var("EXPO_ENABLED")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .unwrap_or(true),
            },
            recipients: parse_recipient_tokens(&get_env(
                "RECIPIENT_TOKENS",
                Some("12345=ExponentPushToken[dev-placeholder]"),
                is_prod,
            )?)?,
        })
    }
}

/// Parses the `RECIPIENT_TOKENS` format: comma-separated `id=token` pairs,
/// e.g. `12345=ExponentPushToken[abc],67890=ExponentPushToken[def]`.
pub fn parse_recipient_tokens(raw: &str) -> Result<HashMap<String, String>, AppError> {
    let mut tokens = HashMap::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (id, token) = entry.split_once('=').ok_or_else(|| {
            AppError::Config(anyhow::anyhow!(
                "invalid RECIPIENT_TOKENS entry {:?}: expected id=token",
                entry
            ))
        })?;

        let id = id.trim();
        let token = token.trim();
        if id.is_empty() || token.is_empty() {
            return Err(AppError::Config(anyhow::anyhow!(
                "invalid RECIPIENT_TOKENS entry {:?}: empty id or token",
                entry
            )));
        }

        tokens.insert(id.to_string(), token.to_string());
    }

    Ok(tokens)
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::Config(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::Config(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
