//! Discord bot integration.
//!
//! The bot runs in the same process as the dashboard, in its own tokio task. Its cache is
//! the dashboard's source of guilds, members, channels and roles; handlers read it through
//! the `BotClient` trait so routes can be exercised against an in-memory bot in tests.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, channel and role state for the cache
//! - `GUILD_MEMBERS` - Member list (privileged intent)
//! - `GUILD_PRESENCES` - Member status shown on the member list (privileged intent)
//! - `GUILD_MESSAGES` and `MESSAGE_CONTENT` - Prefix commands (the latter is privileged)
//!
//! Privileged intents must be enabled in the Discord Developer Portal for the bot
//! application.

pub mod client;
pub mod command;
pub mod handler;
pub mod start;

#[cfg(test)]
pub mod memory;
