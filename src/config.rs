use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Default base URL for the OpenAI-compatible API.
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
/// Default completion model used to write summaries.
const DEFAULT_SUMMARY_MODEL: &str = "text-davinci-003";
/// Default model used to embed summary sentences and document paragraphs.
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Runtime configuration for the summarisation server.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// API key presented to the OpenAI API as a bearer token.
    pub openai_api_key: String,
    /// Base URL of the OpenAI-compatible API.
    pub openai_base_url: String,
    /// Completion model identifier used to generate summaries.
    pub summary_model: String,
    /// Embedding model identifier passed to the provider.
    pub embedding_model: String,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            openai_api_key: load_env("OPENAI_API_KEY")?,
            openai_base_url: load_env_optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            summary_model: load_env_optional("SUMMARY_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string()),
            embedding_model: load_env_optional("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
        })
    }
}

fn load_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        openai_base_url = %config.openai_base_url,
        summary_model = %config.summary_model,
        embedding_model = %config.embedding_model,
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
