pub mod discord;

use anyhow::Result;
use async_trait::async_trait;

/// A guild message received from the gateway
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    /// The message text
    pub text: String,
}

/// A reply threaded onto the message it answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyMessage {
    pub content: String,
    pub channel_id: u64,
    pub message_id: u64,
    pub guild_id: u64,
    /// When false the reply is still posted if the original was deleted.
    pub fail_if_not_exists: bool,
}

impl ReplyMessage {
    pub fn for_gist(original: &IncomingMessage, gist_url: &str) -> Self {
        Self {
            content: format!(
                "Tokens have been detected and sent to <{}> to be invalidated.",
                gist_url
            ),
            channel_id: original.channel_id,
            message_id: original.message_id,
            guild_id: original.guild_id,
            fail_if_not_exists: false,
        }
    }
}

/// Outbound side of a chat platform
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_reply(&self, reply: &ReplyMessage) -> Result<()>;
}
