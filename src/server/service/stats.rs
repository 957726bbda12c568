use crate::server::{
    bot::client::BotClient,
    model::{
        discord::{ChannelKind, Guild},
        stats::{BotStats, GuildStats},
    },
    util::{
        duration::format_uptime,
        process::{format_megabytes, resident_memory_bytes},
    },
};

pub struct StatsService<'a> {
    bot: &'a dyn BotClient,
}

impl<'a> StatsService<'a> {
    pub fn new(bot: &'a dyn BotClient) -> Self {
        Self { bot }
    }

    /// Aggregates counts over every guild the bot is in.
    pub fn bot_stats(&self) -> BotStats {
        let guilds = self.bot.guilds();

        BotStats {
            guilds: guilds.len(),
            members: guilds.iter().map(|guild| guild.member_count).sum(),
            text_channels: guilds
                .iter()
                .map(|guild| guild.channel_count(ChannelKind::Text))
                .sum(),
            voice_channels: guilds
                .iter()
                .map(|guild| guild.channel_count(ChannelKind::Voice))
                .sum(),
            uptime: format_uptime(self.bot.uptime()),
            memory: resident_memory_bytes().map(format_megabytes),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn guild_stats(guild: &Guild) -> GuildStats {
        GuildStats {
            members: guild.member_count,
            online: guild
                .members
                .iter()
                .filter(|member| member.status.is_online())
                .count(),
            bots: guild.members.iter().filter(|member| member.user.bot).count(),
            text_channels: guild.channel_count(ChannelKind::Text),
            voice_channels: guild.channel_count(ChannelKind::Voice),
            categories: guild.channel_count(ChannelKind::Category),
            roles: guild.roles.len(),
            owner: guild
                .member(guild.owner_id)
                .map(|owner| owner.user.tag())
                .unwrap_or_else(|| guild.owner_id.to_string()),
            created_at: guild.created_at(),
        }
    }
}
