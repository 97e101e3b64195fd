mod anthropic;
mod factory;
mod ollama;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_nutrition_prompt, NUTRITION_PROMPT};

use async_trait::async_trait;
use std::error::Error;

/// A generative text model asked for per-100g nutrition figures
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Ask for the per-100g nutrition of `food_name`, returning the raw answer text
    async fn query(&self, food_name: &str) -> Result<String, Box<dyn Error + Send + Sync>>;
}
