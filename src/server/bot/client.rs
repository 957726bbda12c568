//! Read access to the bot's view of Discord.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::DateTime;
use serenity::all::{
    Cache, ChannelType, GuildChannel, GuildId, OnlineStatus, User, UserId,
};
use serenity::async_trait;
use serenity::http::Http;

use crate::server::{
    error::AppError,
    model::discord::{Channel, ChannelKind, DiscordUser, Guild, Member, PresenceStatus, Role},
};

/// Maximum number of members Discord returns per request.
const MEMBERS_PER_REQUEST: u64 = 1000;

/// The bot runtime as seen by the dashboard.
///
/// Every read returns an owned snapshot; nothing borrowed from the cache outlives the call.
#[async_trait]
pub trait BotClient: Send + Sync {
    /// The bot's own account, once connected.
    fn current_user(&self) -> Option<DiscordUser>;

    /// Snapshots of every guild the bot is in.
    fn guilds(&self) -> Vec<Guild>;

    /// Snapshot of a single guild, or `None` if the bot is not in it.
    fn guild(&self, guild_id: u64) -> Option<Guild>;

    /// Time since the bot started.
    fn uptime(&self) -> Duration;

    /// Fetches the complete member list of a guild from Discord, bypassing the cache.
    async fn fetch_members(&self, guild_id: u64) -> Result<Vec<Member>, AppError>;

    /// Makes the bot leave a guild.
    async fn leave_guild(&self, guild_id: u64) -> Result<(), AppError>;
}

/// `BotClient` backed by serenity's cache and HTTP client.
#[derive(Clone)]
pub struct SerenityBot {
    cache: Arc<Cache>,
    http: Arc<Http>,
    started_at: Instant,
}

impl SerenityBot {
    pub fn new(cache: Arc<Cache>, http: Arc<Http>, started_at: Instant) -> Self {
        Self {
            cache,
            http,
            started_at,
        }
    }

    fn presence_statuses(&self, guild_id: GuildId) -> HashMap<u64, PresenceStatus> {
        self.cache
            .guild(guild_id)
            .map(|guild| {
                guild
                    .presences
                    .iter()
                    .map(|(user_id, presence)| (user_id.get(), convert_status(presence.status)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl BotClient for SerenityBot {
    fn current_user(&self) -> Option<DiscordUser> {
        let user = self.cache.current_user();
        Some(convert_user(&user))
    }

    fn guilds(&self) -> Vec<Guild> {
        self.cache
            .guilds()
            .into_iter()
            .filter_map(|guild_id| self.guild(guild_id.get()))
            .collect()
    }

    fn guild(&self, guild_id: u64) -> Option<Guild> {
        let guild = self.cache.guild(to_guild_id(guild_id)?)?;
        tracing::debug!(
            "Snapshot of guild {} ({}) with {} cached members",
            guild.name,
            guild_id,
            guild.members.len()
        );

        let statuses: HashMap<UserId, PresenceStatus> = guild
            .presences
            .iter()
            .map(|(user_id, presence)| (*user_id, convert_status(presence.status)))
            .collect();

        Some(Guild {
            id: guild.id.get(),
            name: guild.name.clone(),
            icon_url: guild.icon_url(),
            owner_id: guild.owner_id.get(),
            member_count: guild.member_count,
            roles: guild
                .roles
                .values()
                .map(|role| Role {
                    id: role.id.get(),
                    name: role.name.clone(),
                    color: role.colour.0,
                    position: role.position,
                    permissions: role.permissions,
                })
                .collect(),
            channels: guild.channels.values().map(convert_channel).collect(),
            members: guild
                .members
                .values()
                .map(|member| {
                    let status = statuses.get(&member.user.id).copied().unwrap_or_default();
                    convert_member(member, status)
                })
                .collect(),
        })
    }

    fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    async fn fetch_members(&self, guild_id: u64) -> Result<Vec<Member>, AppError> {
        let id = to_guild_id(guild_id)
            .ok_or_else(|| AppError::NotFound(format!("Guild {} not found", guild_id)))?;

        let mut fetched = Vec::new();
        let mut after = None;
        loop {
            let page = self
                .http
                .get_guild_members(id, Some(MEMBERS_PER_REQUEST), after)
                .await?;
            let exhausted = (page.len() as u64) < MEMBERS_PER_REQUEST;
            after = page.last().map(|member| member.user.id.get());
            fetched.extend(page);

            if exhausted || after.is_none() {
                break;
            }
        }

        tracing::debug!("Fetched {} members of guild {}", fetched.len(), guild_id);

        let statuses = self.presence_statuses(id);
        Ok(fetched
            .iter()
            .map(|member| {
                let status = statuses
                    .get(&member.user.id.get())
                    .copied()
                    .unwrap_or_default();
                convert_member(member, status)
            })
            .collect())
    }

    async fn leave_guild(&self, guild_id: u64) -> Result<(), AppError> {
        let id = to_guild_id(guild_id)
            .ok_or_else(|| AppError::NotFound(format!("Guild {} not found", guild_id)))?;
        self.http.leave_guild(id).await?;
        Ok(())
    }
}

/// `GuildId::new` panics on zero, which is never a valid snowflake.
fn to_guild_id(guild_id: u64) -> Option<GuildId> {
    (guild_id != 0).then(|| GuildId::new(guild_id))
}

fn convert_user(user: &User) -> DiscordUser {
    DiscordUser {
        id: user.id.get(),
        username: user.name.clone(),
        global_name: user.global_name.clone(),
        discriminator: user.discriminator.map(|discriminator| discriminator.get()),
        bot: user.bot,
        avatar_url: user.avatar_url(),
    }
}

fn convert_member(member: &serenity::all::Member, status: PresenceStatus) -> Member {
    Member {
        user: convert_user(&member.user),
        nickname: member.nick.clone(),
        joined_at: member
            .joined_at
            .and_then(|joined_at| DateTime::from_timestamp(joined_at.unix_timestamp(), 0)),
        role_ids: member.roles.iter().map(|role_id| role_id.get()).collect(),
        status,
    }
}

fn convert_channel(channel: &GuildChannel) -> Channel {
    let kind = match channel.kind {
        ChannelType::Text | ChannelType::News => ChannelKind::Text,
        ChannelType::Voice | ChannelType::Stage => ChannelKind::Voice,
        ChannelType::Category => ChannelKind::Category,
        _ => ChannelKind::Other,
    };

    Channel {
        id: channel.id.get(),
        name: channel.name.clone(),
        kind,
        position: channel.position,
        parent_id: channel.parent_id.map(|parent_id| parent_id.get()),
        topic: channel.topic.clone(),
    }
}

fn convert_status(status: OnlineStatus) -> PresenceStatus {
    match status {
        OnlineStatus::Online => PresenceStatus::Online,
        OnlineStatus::Idle => PresenceStatus::Idle,
        OnlineStatus::DoNotDisturb => PresenceStatus::DoNotDisturb,
        OnlineStatus::Invisible => PresenceStatus::Invisible,
        _ => PresenceStatus::Offline,
    }
}
