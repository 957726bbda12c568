use serenity::all::{Context, Guild, UnavailableGuild};

use super::guild_label;

/// Handles a guild becoming available; serenity updates the cache itself.
pub async fn handle_guild_create(_ctx: Context, guild: Guild, is_new: Option<bool>) {
    if is_new == Some(true) {
        tracing::info!(
            "Joined guild {} with {} members",
            guild_label(guild.id, Some(&guild.name)),
            guild.member_count
        );
    } else {
        tracing::debug!(
            "Guild available: {} - member_count: {}, cached_members: {}",
            guild_label(guild.id, Some(&guild.name)),
            guild.member_count,
            guild.members.len()
        );
    }
}

/// Handles the bot leaving a guild, or a guild going unavailable during an outage.
pub async fn handle_guild_delete(_ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
    let label = guild_label(incomplete.id, full.as_ref().map(|guild| guild.name.as_str()));

    if incomplete.unavailable {
        tracing::warn!("Guild {} became unavailable", label);
    } else {
        tracing::info!("Left guild {}", label);
    }
}
