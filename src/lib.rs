pub mod config;
pub mod error;
pub mod extractor;
pub mod formatter;
pub mod interpreter;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod reply;
pub mod scaler;

pub use config::{BotConfig, ProviderConfig};
pub use error::NutritionError;
pub use model::{
    FailureReason, NutritionRecord, ParsedRequest, PipelineOutcome, PipelineStage, WebhookBatch,
    WebhookEvent,
};
pub use pipeline::{reply_text, NutritionPipeline};
pub use providers::LlmProvider;
pub use reply::{ReplySender, StdoutReplySender};

/// Look up a single message with the configured default provider and return
/// the reply text, error replies included.
///
/// # Example
/// ```no_run
/// # async fn run() -> Result<(), nutrition_lookup::NutritionError> {
/// let reply = nutrition_lookup::lookup("150g 雞胸肉").await?;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
pub async fn lookup(text: &str) -> Result<String, NutritionError> {
    let config = BotConfig::load()?;
    let pipeline = NutritionPipeline::from_config(&config)?;
    Ok(reply_text(&pipeline.run(text).await))
}
