use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Bot configuration: which oracle to ask and how long to wait for it
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    /// Provider used for nutrition lookups
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Oracle request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific oracle provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-3.5-turbo", "claude-3-5-haiku-latest").
    /// Falls back to a per-provider default when unset.
    #[serde(default)]
    pub model: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            enabled: default_enabled(),
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

impl ProviderConfig {
    /// Defaults for a provider with only its model set
    pub fn with_model(model: impl Into<String>) -> Self {
        ProviderConfig {
            model: Some(model.into()),
            ..Default::default()
        }
    }

    /// The configured model, or the default model of `provider_name`
    pub fn model_for(&self, provider_name: &str) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| default_model_for(provider_name).to_string())
    }
}

/// Model used when a provider table does not name one
pub fn default_model_for(provider_name: &str) -> &'static str {
    match provider_name {
        "anthropic" => "claude-3-5-haiku-latest",
        "ollama" => "llama3",
        _ => "gpt-3.5-turbo",
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_enabled() -> bool {
    true
}

// Low temperature keeps the labelled answer format stable
fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    180
}

fn default_timeout() -> u64 {
    30
}

impl BotConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with NUTRITION__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: NUTRITION__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Oracle timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables. See [`BotConfig::load`].
pub fn load_config() -> Result<BotConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("NUTRITION")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
