//! In-memory `BotClient` for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serenity::async_trait;

use crate::server::{
    bot::client::BotClient,
    error::AppError,
    model::discord::{DiscordUser, Guild, Member},
};

/// A bot whose guilds are fixed up front.
#[derive(Default)]
pub struct InMemoryBot {
    user: Option<DiscordUser>,
    guilds: Mutex<Vec<Guild>>,
    /// Member lists returned by `fetch_members` instead of the cached ones.
    refreshed: HashMap<u64, Vec<Member>>,
    uptime: Duration,
    fetched: Mutex<Vec<u64>>,
    left: Mutex<Vec<u64>>,
}

impl InMemoryBot {
    pub fn new() -> Self {
        Self {
            user: Some(fixture::user(1, "dashbot")),
            ..Default::default()
        }
    }

    pub fn with_guild(self, guild: Guild) -> Self {
        self.guilds.lock().unwrap().push(guild);
        self
    }

    pub fn with_refreshed_members(mut self, guild_id: u64, members: Vec<Member>) -> Self {
        self.refreshed.insert(guild_id, members);
        self
    }

    pub fn with_uptime(mut self, uptime: Duration) -> Self {
        self.uptime = uptime;
        self
    }

    /// Guild ids passed to `fetch_members`, in call order.
    pub fn fetched(&self) -> Vec<u64> {
        self.fetched.lock().unwrap().clone()
    }

    /// Guild ids passed to `leave_guild`, in call order.
    pub fn left(&self) -> Vec<u64> {
        self.left.lock().unwrap().clone()
    }
}

#[async_trait]
impl BotClient for InMemoryBot {
    fn current_user(&self) -> Option<DiscordUser> {
        self.user.clone()
    }

    fn guilds(&self) -> Vec<Guild> {
        self.guilds.lock().unwrap().clone()
    }

    fn guild(&self, guild_id: u64) -> Option<Guild> {
        self.guilds
            .lock()
            .unwrap()
            .iter()
            .find(|guild| guild.id == guild_id)
            .cloned()
    }

    fn uptime(&self) -> Duration {
        self.uptime
    }

    async fn fetch_members(&self, guild_id: u64) -> Result<Vec<Member>, AppError> {
        self.fetched.lock().unwrap().push(guild_id);

        if let Some(members) = self.refreshed.get(&guild_id) {
            return Ok(members.clone());
        }

        self.guild(guild_id)
            .map(|guild| guild.members)
            .ok_or_else(|| AppError::NotFound(format!("Guild {} not found", guild_id)))
    }

    async fn leave_guild(&self, guild_id: u64) -> Result<(), AppError> {
        self.left.lock().unwrap().push(guild_id);
        self.guilds.lock().unwrap().retain(|guild| guild.id != guild_id);
        Ok(())
    }
}

/// Builders for Discord snapshots used across tests.
pub mod fixture {
    use chrono::{DateTime, Utc};
    use serenity::all::Permissions;

    use crate::server::model::discord::{
        Channel, ChannelKind, DiscordUser, Guild, Member, PresenceStatus, Role,
    };

    pub fn user(id: u64, username: &str) -> DiscordUser {
        DiscordUser {
            id,
            username: username.to_string(),
            global_name: None,
            discriminator: None,
            bot: false,
            avatar_url: None,
        }
    }

    pub fn member(id: u64, username: &str) -> Member {
        Member {
            user: user(id, username),
            nickname: None,
            joined_at: None,
            role_ids: vec![],
            status: PresenceStatus::Offline,
        }
    }

    pub fn joined(mut member: Member, joined_at: DateTime<Utc>) -> Member {
        member.joined_at = Some(joined_at);
        member
    }

    pub fn role(id: u64, name: &str, position: u16, permissions: Permissions) -> Role {
        Role {
            id,
            name: name.to_string(),
            color: 0,
            position,
            permissions,
        }
    }

    pub fn channel(id: u64, name: &str, kind: ChannelKind, position: u16, parent_id: Option<u64>) -> Channel {
        Channel {
            id,
            name: name.to_string(),
            kind,
            position,
            parent_id,
            topic: None,
        }
    }

    /// A guild owned by `owner_id` with only the `@everyone` role.
    pub fn guild(id: u64, name: &str, owner_id: u64, members: Vec<Member>) -> Guild {
        Guild {
            id,
            name: name.to_string(),
            icon_url: None,
            owner_id,
            member_count: members.len() as u64,
            roles: vec![role(id, "@everyone", 0, Permissions::SEND_MESSAGES)],
            channels: vec![],
            members,
        }
    }
}
