//! Application state shared across all request handlers.
//!
//! The state is built once at startup and cloned into every handler by axum. Every field
//! is reference-counted or a connection pool, so clones are cheap.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{bot::client::BotClient, config::Config, service::oauth::IdentityProvider};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for guild settings.
    pub db: DatabaseConnection,

    /// The bot's view of Discord: guilds, members, uptime and the leave action.
    pub bot: Arc<dyn BotClient>,

    /// OAuth2 identity provider behind `/login` and `/callback`.
    pub identity: Arc<dyn IdentityProvider>,

    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `bot` - Bot client, serenity-backed in production
    /// - `identity` - Identity provider, Discord OAuth2 in production
    /// - `config` - Application configuration
    pub fn new(
        db: DatabaseConnection,
        bot: Arc<dyn BotClient>,
        identity: Arc<dyn IdentityProvider>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            db,
            bot,
            identity,
            config,
        }
    }
}
