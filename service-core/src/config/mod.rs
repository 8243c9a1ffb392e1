use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Loads shared settings from an optional `configuration` file and
    /// `APP__`-prefixed environment variables. A plain `PORT` variable
    /// overrides the configured port for container deployments.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut config: Config = config.try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|e| AppError::Config(anyhow::anyhow!("invalid PORT value: {e}")))?;
        }

        Ok(config)
    }
}
