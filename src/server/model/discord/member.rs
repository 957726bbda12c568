use chrono::{DateTime, Utc};

use super::snowflake_timestamp_ms;

/// Discord account details shared by every guild the user is in.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscordUser {
    pub id: u64,
    pub username: String,
    pub global_name: Option<String>,
    /// Legacy 4-digit discriminator; `None` for accounts migrated to unique usernames.
    pub discriminator: Option<u16>,
    pub bot: bool,
    pub avatar_url: Option<String>,
}

impl DiscordUser {
    /// Account creation time as Unix milliseconds.
    pub fn created_at_ms(&self) -> i64 {
        snowflake_timestamp_ms(self.id)
    }

    /// Discriminator zero-padded to four digits, or `"0"` when the account has none.
    pub fn discriminator(&self) -> String {
        match self.discriminator {
            Some(discriminator) => format!("{:04}", discriminator),
            None => "0".to_string(),
        }
    }

    /// `username#discriminator`, or the bare username for accounts without one.
    pub fn tag(&self) -> String {
        match self.discriminator {
            Some(discriminator) => format!("{}#{:04}", self.username, discriminator),
            None => self.username.clone(),
        }
    }
}

/// Presence status reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenceStatus {
    Online,
    Idle,
    DoNotDisturb,
    Invisible,
    #[default]
    Offline,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Idle => "idle",
            Self::DoNotDisturb => "dnd",
            Self::Invisible => "invisible",
            Self::Offline => "offline",
        }
    }

    pub fn is_online(&self) -> bool {
        !matches!(self, Self::Offline | Self::Invisible)
    }
}

/// A guild member as seen by the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub user: DiscordUser,
    pub nickname: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    /// Explicitly assigned roles; `@everyone` is implied.
    pub role_ids: Vec<u64>,
    pub status: PresenceStatus,
}

impl Member {
    pub fn id(&self) -> u64 {
        self.user.id
    }

    /// Guild nickname, falling back to the global display name and then the username.
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .or(self.user.global_name.as_deref())
            .unwrap_or(&self.user.username)
    }

    pub fn joined_at_ms(&self) -> Option<i64> {
        self.joined_at.map(|joined_at| joined_at.timestamp_millis())
    }
}
