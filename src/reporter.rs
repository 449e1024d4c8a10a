use tracing::{debug, error, info};

use crate::detector;
use crate::error::ReportError;
use crate::gist::GistClient;
use crate::platform::{IncomingMessage, ReplyMessage, ReplySink};

/// Scans messages for tokens and publishes any it finds so they get revoked.
/// Holds no per-message state and is shared across gateway events.
pub struct Reporter {
    gist: GistClient,
}

impl Reporter {
    pub fn new(gist: GistClient) -> Self {
        Self { gist }
    }

    /// Entry point for every guild message. Errors are logged, never returned.
    pub async fn handle(&self, msg: &IncomingMessage, sink: &dyn ReplySink) {
        let tokens = detector::find_tokens(&msg.text);
        if tokens.is_empty() {
            return;
        }

        info!(
            "Detected {} token(s) in message {} (channel {}, guild {})",
            tokens.len(),
            msg.message_id,
            msg.channel_id,
            msg.guild_id
        );

        match self.report(msg, &tokens, sink).await {
            Ok(url) => debug!("Reported message {} via {}", msg.message_id, url),
            Err(e) => error!(
                status = ?e.status(),
                "Failed to report tokens from message {}: {}",
                msg.message_id,
                e
            ),
        }
    }

    /// Publish `tokens` and reply to `msg` with the gist URL.
    pub async fn report(
        &self,
        msg: &IncomingMessage,
        tokens: &[String],
        sink: &dyn ReplySink,
    ) -> Result<String, ReportError> {
        let url = self.gist.create(tokens).await?;
        info!("Tokens from message {} published at {}", msg.message_id, url);

        let reply = ReplyMessage::for_gist(msg, &url);
        sink.send_reply(&reply).await.map_err(ReportError::Reply)?;

        Ok(url)
    }
}
