use crate::config::{BotConfig, ProviderConfig};
use crate::providers::{AnthropicProvider, LlmProvider, OllamaProvider, OpenAIProvider};
use std::error::Error;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )
            .into());
        }

        match provider_name {
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config)?)),
            "ollama" => Ok(Box::new(OllamaProvider::new(config)?)),
            _ => Err(format!("Unknown provider: {}", provider_name).into()),
        }
    }

    /// Get the default provider from configuration.
    ///
    /// When the default provider has no table of its own, it is built with
    /// default settings so that an API key in the environment is enough.
    pub fn get_default_provider(
        config: &BotConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        let provider_name = &config.default_provider;
        match config.providers.get(provider_name) {
            Some(provider_config) => Self::create(provider_name, provider_config),
            None => Self::create(provider_name, &ProviderConfig::default()),
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "anthropic", "ollama"]
    }
}
