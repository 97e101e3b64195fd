use log::error;
use nutrition_lookup::{
    reply_text, BotConfig, NutritionError, NutritionPipeline, StdoutReplySender, WebhookBatch,
};
use std::env;

const USAGE: &str = "Usage:\n  nutrition-lookup <message>\n  nutrition-lookup --events <webhook.json>";

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), NutritionError> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    let config = BotConfig::load()?;
    let pipeline = NutritionPipeline::from_config(&config)?;

    if args[0] == "--events" {
        let path = args.get(1).ok_or_else(|| {
            NutritionError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "--events needs a file path",
            ))
        })?;
        let body = tokio::fs::read_to_string(path).await?;
        let batch: WebhookBatch = serde_json::from_str(&body)?;
        pipeline.handle_batch(&batch.events, &StdoutReplySender).await;
    } else {
        let message = args.join(" ");
        println!("{}", reply_text(&pipeline.run(&message).await));
    }

    Ok(())
}
