use async_trait::async_trait;
use nutrition_lookup::formatter::format_error;
use nutrition_lookup::{
    reply_text, FailureReason, LlmProvider, NutritionPipeline, PipelineOutcome, ReplySender,
    WebhookBatch, WebhookEvent,
};
use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;

const CHICKEN_ANSWER: &str =
    "熱量：約 250 大卡 / 100g\n蛋白質：約 20g\n脂肪：約 10g\n碳水化合物：約 5g";

/// Answers from a fixed table; unknown foods fail like a broken API call
struct TableOracle {
    answers: HashMap<String, String>,
    calls: AtomicUsize,
}

impl TableOracle {
    fn new(entries: &[(&str, &str)]) -> Self {
        TableOracle {
            answers: entries
                .iter()
                .map(|(food, answer)| (food.to_string(), answer.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LlmProvider for TableOracle {
    fn provider_name(&self) -> &str {
        "table"
    }

    async fn query(&self, food_name: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(food_name)
            .cloned()
            .ok_or_else(|| "500 Internal Server Error: upstream exploded".into())
    }
}

/// Never answers
struct SilentOracle;

#[async_trait]
impl LlmProvider for SilentOracle {
    fn provider_name(&self) -> &str {
        "silent"
    }

    async fn query(&self, _food_name: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        std::future::pending().await
    }
}

/// Only answers once `parties` queries are in flight at the same time
struct RendezvousOracle {
    barrier: Barrier,
}

#[async_trait]
impl LlmProvider for RendezvousOracle {
    fn provider_name(&self) -> &str {
        "rendezvous"
    }

    async fn query(&self, _food_name: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        self.barrier.wait().await;
        Ok(CHICKEN_ANSWER.to_string())
    }
}

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingSender {
    fn failing() -> Self {
        RecordingSender {
            fail: true,
            ..Default::default()
        }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    fn reply_for(&self, token: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .find(|(t, _)| t == token)
            .map(|(_, text)| text)
    }
}

#[async_trait]
impl ReplySender for RecordingSender {
    async fn send_reply(
        &self,
        reply_token: &str,
        text: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.sent
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.to_string()));
        if self.fail {
            return Err("channel closed".into());
        }
        Ok(())
    }
}

fn pipeline(oracle: impl LlmProvider + 'static) -> NutritionPipeline {
    NutritionPipeline::new(Arc::new(oracle), Duration::from_secs(5))
}

#[tokio::test]
async fn test_scaled_reply_for_weighted_message() {
    let pipeline = pipeline(TableOracle::new(&[("雞胸肉", CHICKEN_ANSWER)]));

    let outcome = pipeline.run("150g 雞胸肉").await;

    assert_eq!(
        outcome,
        PipelineOutcome::Success(
            "食物：雞胸肉\n重量：150 g\n熱量：約 375 大卡\n蛋白質：約 30.0 g\n脂肪：約 15.0 g\n碳水化合物：約 7.5 g"
                .to_string()
        )
    );
}

#[tokio::test]
async fn test_message_without_weight_uses_100g() {
    let pipeline = pipeline(TableOracle::new(&[("雞胸肉", CHICKEN_ANSWER)]));

    let outcome = pipeline.run("雞胸肉").await;

    match outcome {
        PipelineOutcome::Success(reply) => {
            assert!(reply.contains("重量：100 g"));
            assert!(reply.contains("熱量：約 250 大卡"));
            assert!(reply.contains("碳水化合物：約 5.0 g"));
        }
        other => panic!("Expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_digits_only_gets_usage_hint_without_oracle_call() {
    let oracle = Arc::new(TableOracle::new(&[]));
    let pipeline = NutritionPipeline::new(oracle.clone(), Duration::from_secs(5));

    let outcome = pipeline.run("200").await;

    assert_eq!(outcome, PipelineOutcome::Failure(FailureReason::UsageHint));
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_oracle_error_becomes_unavailable() {
    let pipeline = pipeline(TableOracle::new(&[]));

    let outcome = pipeline.run("150g 恐龍肉").await;

    assert_eq!(
        outcome,
        PipelineOutcome::Failure(FailureReason::OracleUnavailable)
    );
    // Internal detail stays in the logs
    let text = reply_text(&outcome);
    assert!(!text.contains("500"));
    assert!(!text.contains("exploded"));
}

#[tokio::test]
async fn test_unreadable_answer_is_parse_failure() {
    let pipeline = pipeline(TableOracle::new(&[("???", "抱歉，我不知道這是什麼。")]));

    let outcome = pipeline.run("???").await;

    assert_eq!(outcome, PipelineOutcome::Failure(FailureReason::ParseFailure));
}

#[tokio::test]
async fn test_partial_answer_still_succeeds() {
    let pipeline = pipeline(TableOracle::new(&[("可樂", "熱量：約 42 大卡\n碳水化合物：約 10.6 g")]));

    let outcome = pipeline.run("330 可樂").await;

    match outcome {
        PipelineOutcome::Success(reply) => {
            assert!(reply.contains("熱量：約 139 大卡"));
            assert!(reply.contains("蛋白質：約 0.0 g"));
            assert!(reply.contains("脂肪：約 0.0 g"));
            assert!(reply.contains("碳水化合物：約 35.0 g"));
        }
        other => panic!("Expected success, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_oracle_timeout_becomes_unavailable() {
    let pipeline = NutritionPipeline::new(Arc::new(SilentOracle), Duration::from_secs(30));

    let outcome = pipeline.run("雞胸肉").await;

    assert_eq!(
        outcome,
        PipelineOutcome::Failure(FailureReason::OracleUnavailable)
    );
}

#[tokio::test]
async fn test_non_text_events_are_ignored() {
    let pipeline = pipeline(TableOracle::new(&[("雞胸肉", CHICKEN_ANSWER)]));
    let sender = RecordingSender::default();
    let batch: WebhookBatch = serde_json::from_str(
        r#"{"events": [
            {"type": "follow", "replyToken": "t-follow"},
            {"type": "message", "replyToken": "t-sticker", "message": {"type": "sticker"}},
            {"type": "message", "message": {"type": "text", "text": "雞胸肉"}}
        ]}"#,
    )
    .unwrap();

    let outcomes = pipeline.handle_batch(&batch.events, &sender).await;

    assert_eq!(outcomes, vec![None, None, None]);
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let pipeline = pipeline(TableOracle::new(&[("雞胸肉", CHICKEN_ANSWER)]));
    let sender = RecordingSender::default();
    let events = vec![
        WebhookEvent::text_message("t-ok", "150g 雞胸肉"),
        WebhookEvent::text_message("t-oracle", "龍蝦"),
        WebhookEvent::text_message("t-usage", "200"),
    ];

    let outcomes = pipeline.handle_batch(&events, &sender).await;

    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0], Some(PipelineOutcome::Success(_))));
    assert_eq!(
        outcomes[1],
        Some(PipelineOutcome::Failure(FailureReason::OracleUnavailable))
    );
    assert_eq!(
        outcomes[2],
        Some(PipelineOutcome::Failure(FailureReason::UsageHint))
    );

    // Exactly one reply per text message
    assert_eq!(sender.sent().len(), 3);
    assert!(sender.reply_for("t-ok").unwrap().contains("熱量：約 375 大卡"));
    assert_eq!(
        sender.reply_for("t-oracle").unwrap(),
        format_error(FailureReason::OracleUnavailable)
    );
    assert_eq!(
        sender.reply_for("t-usage").unwrap(),
        format_error(FailureReason::UsageHint)
    );
}

#[tokio::test(start_paused = true)]
async fn test_batch_queries_run_concurrently() {
    let pipeline = pipeline(RendezvousOracle {
        barrier: Barrier::new(3),
    });
    let sender = RecordingSender::default();
    let events = vec![
        WebhookEvent::text_message("a", "雞胸肉"),
        WebhookEvent::text_message("b", "100g 雞胸肉"),
        WebhookEvent::text_message("c", "200g 雞胸肉"),
    ];

    let outcomes = pipeline.handle_batch(&events, &sender).await;

    // Sequential handling would leave every query waiting until it times out
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, Some(PipelineOutcome::Success(_)))));
    assert!(sender.reply_for("c").unwrap().contains("熱量：約 500 大卡"));
}

#[tokio::test]
async fn test_failed_reply_send_keeps_outcome() {
    let pipeline = pipeline(TableOracle::new(&[("雞胸肉", CHICKEN_ANSWER)]));
    let sender = RecordingSender::failing();
    let event = WebhookEvent::text_message("t-1", "雞胸肉");

    let outcome = pipeline.handle_event(&event, &sender).await;

    assert!(matches!(outcome, Some(PipelineOutcome::Success(_))));
    assert_eq!(sender.sent().len(), 1);
}
