use std::{env, net::SocketAddr, str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid environment variable format for {0}: {1}")]
    InvalidVar(String, String),
}

#[derive(Clone, Debug)] // Clone needed if passed around, Debug for logging
pub struct Config {
    pub bind_address: SocketAddr,
    pub redis_url: String,
    pub openai_api_key: String,
    /// Base URL of the chat/image API. Overridable so tests can point at a fake.
    pub openai_api_base: String,
    pub openai_model: String,
    /// Prefix used when building share and image URLs in responses.
    pub public_base_url: String,
    /// Lifetime of a stored result (fields and image expire together).
    pub result_ttl: Duration,
    pub synthesis_timeout: Duration,
    pub image_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors, relies on env vars otherwise)
        dotenvy::dotenv().ok();

        let bind_address_str =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = SocketAddr::from_str(&bind_address_str)
            .map_err(|e| ConfigError::InvalidVar("BIND_ADDRESS".into(), e.to_string()))?;

        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let openai_api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingVar("OPENAI_API_KEY".into()))?;

        let openai_api_base = env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let openai_model =
            env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let public_base_url =
            env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| format!("http://{}", bind_address));

        let result_ttl = Duration::from_secs(read_secs("RESULT_TTL_SECS", 86_400)?);
        let synthesis_timeout = Duration::from_secs(read_secs("SYNTHESIS_TIMEOUT_SECS", 30)?);
        let image_timeout = Duration::from_secs(read_secs("IMAGE_TIMEOUT_SECS", 60)?);

        Ok(Config {
            bind_address,
            redis_url,
            openai_api_key,
            openai_api_base,
            openai_model,
            public_base_url,
            result_ttl,
            synthesis_timeout,
            image_timeout,
        })
    }
}

fn read_secs(var: &str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidVar(var.into(), e.to_string())),
        Err(_) => Ok(default),
    }
}
