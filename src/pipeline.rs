use crate::config::BotConfig;
use crate::error::NutritionError;
use crate::extractor::extract;
use crate::formatter::{format_error, format_reply};
use crate::interpreter::interpret;
use crate::model::{FailureReason, PipelineOutcome, PipelineStage, WebhookEvent};
use crate::providers::{LlmProvider, ProviderFactory};
use crate::reply::ReplySender;
use crate::scaler::scale;
use futures::future::join_all;
use log::{debug, error, info, warn};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Runs messages through interpret → query → extract → scale → format.
///
/// Every message is handled on its own: a failure anywhere becomes a
/// [`FailureReason`] for that message only and is answered with the matching
/// error text. Nothing is shared between runs besides the oracle handle.
pub struct NutritionPipeline {
    oracle: Arc<dyn LlmProvider>,
    oracle_timeout: Duration,
}

impl NutritionPipeline {
    pub fn new(oracle: Arc<dyn LlmProvider>, oracle_timeout: Duration) -> Self {
        NutritionPipeline {
            oracle,
            oracle_timeout,
        }
    }

    /// Build a pipeline around the configured default provider
    pub fn from_config(config: &BotConfig) -> Result<Self, NutritionError> {
        let provider = ProviderFactory::get_default_provider(config)
            .map_err(|e| NutritionError::Provider(e.to_string()))?;
        info!(
            "Using '{}' as nutrition oracle (timeout {}s)",
            provider.provider_name(),
            config.timeout
        );
        Ok(Self::new(Arc::from(provider), config.timeout()))
    }

    /// Answer one text message
    pub async fn run(&self, text: &str) -> PipelineOutcome {
        match self.lookup(text).await {
            Ok(reply) => PipelineOutcome::Success(reply),
            Err(reason) => PipelineOutcome::Failure(reason),
        }
    }

    async fn lookup(&self, text: &str) -> Result<String, FailureReason> {
        debug!("{}: {:?}", PipelineStage::Received, text);

        let request = interpret(text)
            .map_err(|e| errored(PipelineStage::Received, FailureReason::UsageHint, e))?;
        debug!(
            "{}: {:?} at {} g",
            PipelineStage::Interpreted,
            request.food_name,
            request.weight_grams
        );

        let answer = self.query_oracle(&request.food_name).await.map_err(|e| {
            errored(
                PipelineStage::Interpreted,
                FailureReason::OracleUnavailable,
                e,
            )
        })?;
        debug!("{}: {:?}", PipelineStage::Queried, answer);

        let per_100g = extract(&answer)
            .map_err(|e| errored(PipelineStage::Queried, FailureReason::ParseFailure, e))?;
        debug!("{}: {:?}", PipelineStage::Extracted, per_100g);

        let scaled = scale(&per_100g, request.weight_grams);
        debug!("{}: {:?}", PipelineStage::Scaled, scaled);

        info!(
            "{}: {} ({} g) via {}",
            PipelineStage::Replied,
            request.food_name,
            request.weight_grams,
            self.oracle.provider_name()
        );
        Ok(format_reply(&request, &scaled))
    }

    async fn query_oracle(&self, food_name: &str) -> Result<String, NutritionError> {
        match timeout(self.oracle_timeout, self.oracle.query(food_name)).await {
            Ok(Ok(answer)) => Ok(answer),
            Ok(Err(e)) => Err(NutritionError::OracleUnavailable(e.to_string())),
            Err(_) => Err(NutritionError::OracleTimeout(self.oracle_timeout)),
        }
    }

    /// Handle one inbound event and send its reply.
    ///
    /// Returns `None` for events that are not text messages or carry no reply
    /// token. A reply that cannot be delivered is logged; the outcome is still
    /// returned.
    pub async fn handle_event(
        &self,
        event: &WebhookEvent,
        sender: &dyn ReplySender,
    ) -> Option<PipelineOutcome> {
        let text = event.text()?;
        let Some(reply_token) = event.reply_token.as_deref() else {
            warn!("Text message without reply token ignored");
            return None;
        };

        let outcome = self.run(text).await;
        if let Err(e) = sender.send_reply(reply_token, &reply_text(&outcome)).await {
            error!("Failed to send reply for token {}: {}", reply_token, e);
        }
        Some(outcome)
    }

    /// Handle a batch of events concurrently.
    ///
    /// Results line up with `events`; replies are sent as each lookup
    /// finishes, in no particular order.
    pub async fn handle_batch(
        &self,
        events: &[WebhookEvent],
        sender: &dyn ReplySender,
    ) -> Vec<Option<PipelineOutcome>> {
        let outcomes = join_all(events.iter().map(|event| self.handle_event(event, sender))).await;

        let handled = outcomes.iter().flatten().count();
        let succeeded = outcomes.iter().flatten().filter(|o| o.is_success()).count();
        info!(
            "Batch done: {} events, {} handled, {} succeeded",
            events.len(),
            handled,
            succeeded
        );
        outcomes
    }
}

/// Text to send back for an outcome
pub fn reply_text(outcome: &PipelineOutcome) -> String {
    match outcome {
        PipelineOutcome::Success(reply) => reply.clone(),
        PipelineOutcome::Failure(reason) => format_error(*reason),
    }
}

fn errored(stage: PipelineStage, reason: FailureReason, detail: impl Display) -> FailureReason {
    warn!("{} -> {}: {}", stage, PipelineStage::Errored(reason), detail);
    reason
}
