//! Catalogue of the bot's prefix commands.
//!
//! The same table drives command dispatch in the message handler and the `/commands`
//! page, so the two cannot drift apart.

use std::collections::BTreeMap;

/// A prefix command the bot answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub category: &'static str,
    /// Invocation without the prefix.
    pub usage: &'static str,
    /// Markdown help text.
    pub description: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "ping",
        category: "System",
        usage: "ping",
        description: "Checks that the bot is alive. Replies with **Pong!**",
    },
    CommandInfo {
        name: "help",
        category: "System",
        usage: "help [command]",
        description: "Lists every command, or shows the usage of a single `command`.",
    },
    CommandInfo {
        name: "stats",
        category: "System",
        usage: "stats",
        description: "Shows the number of servers and members the bot serves, its uptime \
                      and its memory usage.",
    },
    CommandInfo {
        name: "conf",
        category: "Settings",
        usage: "conf",
        description: "Shows this server's settings. Values are changed on the \
                      [dashboard](/dashboard).",
    },
];

/// Looks up a command by name, ignoring case.
pub fn find(name: &str) -> Option<&'static CommandInfo> {
    COMMANDS
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

/// Commands grouped by category, categories in alphabetical order.
pub fn by_category() -> BTreeMap<&'static str, Vec<&'static CommandInfo>> {
    let mut categories: BTreeMap<&'static str, Vec<&'static CommandInfo>> = BTreeMap::new();
    for command in COMMANDS {
        categories.entry(command.category).or_default().push(command);
    }
    categories
}
