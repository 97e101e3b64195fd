use serde::Deserialize;
use std::fmt;

/// A food lookup request interpreted from a user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// Trimmed, never empty
    pub food_name: String,
    /// Always greater than zero
    pub weight_grams: u32,
}

/// Calories and macronutrients for some weight of food.
///
/// The extractor produces per-100g records; the scaler turns those into
/// records for the requested weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionRecord {
    pub calories: f64,
    pub protein_grams: f64,
    pub fat_grams: f64,
    pub carbs_grams: f64,
}

/// Why a message could not be answered with nutrition figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// The message has no food name left after removing the weight
    UsageHint,
    /// The oracle errored or timed out
    OracleUnavailable,
    /// Nothing usable could be read from the oracle's answer
    ParseFailure,
}

impl FailureReason {
    pub fn code(&self) -> &'static str {
        match self {
            FailureReason::UsageHint => "usage_hint",
            FailureReason::OracleUnavailable => "oracle_unavailable",
            FailureReason::ParseFailure => "parse_failure",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Result of running one message through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Formatted nutrition reply
    Success(String),
    Failure(FailureReason),
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success(_))
    }
}

/// States a message moves through inside the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Interpreted,
    Queried,
    Extracted,
    Scaled,
    Replied,
    Errored(FailureReason),
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Received => f.write_str("received"),
            PipelineStage::Interpreted => f.write_str("interpreted"),
            PipelineStage::Queried => f.write_str("queried"),
            PipelineStage::Extracted => f.write_str("extracted"),
            PipelineStage::Scaled => f.write_str("scaled"),
            PipelineStage::Replied => f.write_str("replied"),
            PipelineStage::Errored(reason) => write!(f, "errored({})", reason),
        }
    }
}

/// Body of an inbound messaging webhook call
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBatch {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// One inbound event. Only text messages are handled; follows, stickers,
/// images and the like are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub reply_token: Option<String>,
    pub message: Option<EventMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}

impl WebhookEvent {
    /// Build a text message event
    pub fn text_message(reply_token: impl Into<String>, text: impl Into<String>) -> Self {
        WebhookEvent {
            kind: "message".to_string(),
            reply_token: Some(reply_token.into()),
            message: Some(EventMessage {
                kind: "text".to_string(),
                text: Some(text.into()),
            }),
        }
    }

    /// The message text, if this is a text message event
    pub fn text(&self) -> Option<&str> {
        if self.kind != "message" {
            return None;
        }
        let message = self.message.as_ref()?;
        if message.kind != "text" {
            return None;
        }
        message.text.as_deref()
    }
}
