use chrono::{DateTime, Utc};

use crate::server::util::duration::Uptime;

/// Bot-wide statistics shown on `/stats` and `/botadmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct BotStats {
    pub guilds: usize,
    /// Sum of the member counts Discord reports for each guild.
    pub members: u64,
    pub text_channels: usize,
    pub voice_channels: usize,
    pub uptime: Uptime,
    /// Formatted resident memory, `None` where it cannot be read.
    pub memory: Option<String>,
    pub version: &'static str,
}

/// Statistics of a single guild, shown on `/dashboard/{guild_id}/stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildStats {
    pub members: u64,
    pub online: usize,
    pub bots: usize,
    pub text_channels: usize,
    pub voice_channels: usize,
    pub categories: usize,
    pub roles: usize,
    /// Owner's tag, or the raw id when the owner is not cached.
    pub owner: String,
    pub created_at: Option<DateTime<Utc>>,
}
