//! Prefix command handling.
//!
//! A message is a command when it starts with the guild's `prefix` setting. Replies are
//! plain messages in the same channel.

use serenity::all::{Context, Message};

use crate::server::{
    bot::{
        client::SerenityBot,
        command::{self, CommandInfo, COMMANDS},
        handler::Handler,
    },
    model::{settings::GuildSettings, stats::BotStats},
    service::{settings::GuildSettingsService, stats::StatsService},
};

/// A parsed command invocation.
#[derive(Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: &'a str,
    pub args: Vec<&'a str>,
}

/// Handle message creation in a channel
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    // Commands are per guild; DMs have no prefix setting
    let Some(guild_id) = message.guild_id else {
        return;
    };

    let settings_service = GuildSettingsService::new(&handler.db, &handler.defaults);
    let settings = match settings_service.get(guild_id.get()).await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings of guild {}: {}", guild_id, e);
            return;
        }
    };

    let prefix = settings.get("prefix").unwrap_or("~");
    let Some(invocation) = parse_invocation(&message.content, prefix) else {
        return;
    };

    let reply = match invocation.name {
        "ping" => "Pong!".to_string(),
        "help" => help_reply(prefix, invocation.args.first().copied()),
        "stats" => {
            let bot = SerenityBot::new(ctx.cache.clone(), ctx.http.clone(), handler.started_at);
            stats_reply(&StatsService::new(&bot).bot_stats())
        }
        "conf" => conf_reply(&settings),
        _ => return,
    };

    tracing::debug!(
        "Command {} invoked by {} in guild {}",
        invocation.name,
        message.author.name,
        guild_id
    );

    if let Err(e) = message.channel_id.say(&ctx.http, reply).await {
        tracing::error!(
            "Failed to reply to command in channel {}: {}",
            message.channel_id,
            e
        );
    }
}

/// Splits `content` into a lowercased command name and arguments if it starts with `prefix`.
pub fn parse_invocation<'a>(content: &'a str, prefix: &str) -> Option<Invocation<'a>> {
    if prefix.is_empty() {
        return None;
    }

    let mut words = content.strip_prefix(prefix)?.split_whitespace();
    let name = words.next()?;
    let command = command::find(name)?;

    Some(Invocation {
        name: command.name,
        args: words.collect(),
    })
}

fn help_reply(prefix: &str, topic: Option<&str>) -> String {
    match topic.and_then(command::find) {
        Some(command) => describe(prefix, command),
        None => {
            let mut reply = String::from("**Commands**\n");
            for command in COMMANDS {
                reply.push_str(&format!("`{}{}`\n", prefix, command.usage));
            }
            reply.push_str(&format!("Use `{}help <command>` for details.", prefix));
            reply
        }
    }
}

fn describe(prefix: &str, command: &CommandInfo) -> String {
    format!(
        "`{}{}` ({})\n{}",
        prefix, command.usage, command.category, command.description
    )
}

fn stats_reply(stats: &BotStats) -> String {
    format!(
        "Servers: {}\nMembers: {}\nUptime: {} ({})\nMemory: {}\nVersion: {}",
        stats.guilds,
        stats.members,
        stats.uptime.clock,
        stats.uptime.unit,
        stats.memory.as_deref().unwrap_or("unknown"),
        stats.version
    )
}

fn conf_reply(settings: &GuildSettings) -> String {
    let lines: Vec<String> = settings
        .entries
        .iter()
        .map(|entry| format!("{} : {}", entry.key, entry.value))
        .collect();
    format!("```\n{}\n```", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn parses_prefixed_commands() {
        assert_eq!(
            parse_invocation("~help conf", "~"),
            Some(Invocation {
                name: "help",
                args: vec!["conf"],
            })
        );
        assert_eq!(parse_invocation("!!PING", "!!").map(|i| i.name), Some("ping"));
    }

    #[test]
    fn ignores_other_messages() {
        assert_eq!(parse_invocation("hello ~ping", "~"), None);
        assert_eq!(parse_invocation("~", "~"), None);
        assert_eq!(parse_invocation("~unknown", "~"), None);
        assert_eq!(parse_invocation("~ping", ""), None);
    }

    #[test]
    fn help_lists_commands_with_prefix() {
        let reply = help_reply("!", None);
        assert!(reply.contains("`!ping`"));
        assert!(reply.contains("`!help [command]`"));

        let detail = help_reply("!", Some("conf"));
        assert!(detail.starts_with("`!conf` (Settings)"));
    }

    #[test]
    fn conf_lists_effective_settings() {
        let defaults = BTreeMap::from([("prefix".to_string(), "~".to_string())]);
        let settings = GuildSettings::merge(1, &defaults, BTreeMap::new());
        assert_eq!(conf_reply(&settings), "```\nprefix : ~\n```");
    }
}
