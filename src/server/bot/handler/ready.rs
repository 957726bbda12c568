//! Ready event handler.
//!
//! Fired once per gateway connection after the initial handshake.

use std::collections::BTreeMap;

use serenity::all::{ActivityData, Context, Ready};

/// Logs the connection and advertises the help command in the bot's activity.
///
/// # Arguments
/// - `defaults` - Default guild settings, for the default command prefix
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(defaults: &BTreeMap<String, String>, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord, serving {} guilds",
        ready.user.name,
        ready.guilds.len()
    );

    let prefix = defaults.get("prefix").map(String::as_str).unwrap_or("~");
    ctx.set_activity(Some(ActivityData::playing(format!("{}help", prefix))));
}
