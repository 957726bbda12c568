use std::collections::BTreeMap;
use std::time::Instant;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Guild, GuildId, Message, Ready, UnavailableGuild};
use serenity::async_trait;

pub mod guild;
pub mod message;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    /// Default guild settings, needed to resolve each guild's command prefix.
    pub defaults: BTreeMap<String, String>,
    pub started_at: Instant,
}

impl Handler {
    pub fn new(
        db: DatabaseConnection,
        defaults: BTreeMap<String, String>,
        started_at: Instant,
    ) -> Self {
        Self {
            db,
            defaults,
            started_at,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.defaults, ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(ctx, guild, is_new).await;
    }

    /// Called when the bot leaves or is removed from a guild
    async fn guild_delete(&self, ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        guild::handle_guild_delete(ctx, incomplete, full).await;
    }

    /// Called for every message the bot can see
    async fn message(&self, ctx: Context, new_message: Message) {
        message::handle_message(self, ctx, new_message).await;
    }

    /// Called when the member chunk for a guild arrives
    async fn guild_members_chunk(
        &self,
        _ctx: Context,
        chunk: serenity::all::GuildMembersChunkEvent,
    ) {
        tracing::debug!(
            "Received {} members for guild {}",
            chunk.members.len(),
            chunk.guild_id
        );
    }
}

/// Name used in logs for a guild that may no longer be cached.
fn guild_label(guild_id: GuildId, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} ({})", name, guild_id),
        None => guild_id.to_string(),
    }
}
