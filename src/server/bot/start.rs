use std::time::Instant;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::server::{
    bot::{client::SerenityBot, handler::Handler},
    config::Config,
    error::AppError,
};

/// Builds the Discord bot client without connecting it.
///
/// The returned `SerenityBot` shares the client's cache and HTTP client, so the dashboard
/// can read guild state while `start_bot` drives the gateway connection.
///
/// # Arguments
/// - `config` - Application configuration with the bot token and default settings
/// - `db` - Database connection used to look up guild prefixes
///
/// # Returns
/// - `Ok((Client, SerenityBot))` - Client to start, and the dashboard's view of it
/// - `Err(AppError::DiscordErr)` - Client could not be built, e.g. an invalid token
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
) -> Result<(Client, SerenityBot), AppError> {
    // GUILD_MEMBERS, GUILD_PRESENCES and MESSAGE_CONTENT are privileged intents
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_PRESENCES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let started_at = Instant::now();
    let handler = Handler::new(db, config.default_settings.clone(), started_at);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    let bot = SerenityBot::new(client.cache.clone(), client.http.clone(), started_at);

    Ok((client, bot))
}

/// Runs the gateway connection until shutdown.
///
/// Should be spawned on its own task since it only returns when the connection ends.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
