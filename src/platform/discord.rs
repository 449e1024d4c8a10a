use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::all::{
    ActivityData, ChannelId, Context, CreateMessage, EventHandler, GatewayIntents, GuildId,
    Message, MessageId, MessageReference, Ready,
};
use serenity::http::Http;
use serenity::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::platform::{IncomingMessage, ReplyMessage, ReplySink};
use crate::reporter::Reporter;

/// Posts replies through serenity's REST client
pub struct DiscordReplies {
    http: Arc<Http>,
}

impl DiscordReplies {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ReplySink for DiscordReplies {
    async fn send_reply(&self, reply: &ReplyMessage) -> Result<()> {
        let channel = ChannelId::new(reply.channel_id);
        let builder = CreateMessage::new()
            .content(&reply.content)
            .reference_message(message_reference(reply));

        channel
            .send_message(&*self.http, builder)
            .await
            .with_context(|| format!("Failed to send reply to channel {}", reply.channel_id))?;
        Ok(())
    }
}

fn message_reference(reply: &ReplyMessage) -> MessageReference {
    let mut reference = MessageReference::from((
        ChannelId::new(reply.channel_id),
        MessageId::new(reply.message_id),
    ));
    reference.guild_id = Some(GuildId::new(reply.guild_id));
    reference.fail_if_not_exists = Some(reply.fail_if_not_exists);
    reference
}

/// Guild messages only; DMs are ignored.
fn to_incoming(msg: &Message) -> Option<IncomingMessage> {
    let guild_id = msg.guild_id?;
    Some(IncomingMessage {
        guild_id: guild_id.get(),
        channel_id: msg.channel_id.get(),
        message_id: msg.id.get(),
        text: msg.content.clone(),
    })
}

struct Handler {
    reporter: Arc<Reporter>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            "Connected to Discord as {} ({} guild(s))",
            ready.user.name,
            ready.guilds.len()
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let Some(incoming) = to_incoming(&msg) else {
            return;
        };
        let replies = DiscordReplies::new(ctx.http.clone());
        self.reporter.handle(&incoming, &replies).await;
    }
}

/// Run the gateway session until SIGINT/SIGTERM
pub async fn run(config: &Config, reporter: Arc<Reporter>) -> Result<()> {
    let intents = GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    info!("Starting Discord platform...");

    let mut client = Client::builder(&config.bot_token, intents)
        .event_handler(Handler { reporter })
        .activity(ActivityData::watching("tokens"))
        .await
        .context("Failed to build Discord client")?;

    let shard_manager = client.shard_manager.clone();

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            let mut sigterm = match tokio::signal::unix::signal(
                tokio::signal::unix::SignalKind::terminate(),
            ) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    let _ = tokio::signal::ctrl_c().await;
                    info!("Interrupt received, closing gateway session");
                    shard_manager.shutdown_all().await;
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => {}
                _ = tokio::signal::ctrl_c() => {}
            }
            info!("Shutdown signal received, closing gateway session");
            shard_manager.shutdown_all().await;
        });
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Interrupt received, closing gateway session");
            shard_manager.shutdown_all().await;
        });
    }

    client
        .start()
        .await
        .context("Error while connecting to the Discord gateway")?;

    info!("Discord gateway session closed");
    Ok(())
}
