use async_trait::async_trait;
use std::error::Error;

/// Outbound channel that delivers one text reply per handled message
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send_reply(
        &self,
        reply_token: &str,
        text: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Prints replies to stdout, for local use from the command line
pub struct StdoutReplySender;

#[async_trait]
impl ReplySender for StdoutReplySender {
    async fn send_reply(
        &self,
        reply_token: &str,
        text: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("[{}]\n{}\n", reply_token, text);
        Ok(())
    }
}
