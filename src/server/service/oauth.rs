//! OAuth2 login with Discord.

use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use serde::Deserialize;
use serenity::async_trait;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::{AuthUser, UserGuild},
    state::OAuth2Client,
    util::parse::parse_u64_from_string,
};

const DISCORD_API_URL: &str = "https://discord.com/api/v10";

/// Identity provider behind the login flow.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authorization URL requesting the `identify` and `guilds` scopes, and its CSRF state.
    fn authorize_url(&self) -> (String, String);

    /// Exchanges an authorization code for the user's profile and guild list.
    async fn exchange(&self, code: String) -> Result<AuthUser, AppError>;
}

pub struct DiscordAuthService {
    http_client: reqwest::Client,
    oauth_client: OAuth2Client,
}

impl DiscordAuthService {
    pub fn new(http_client: reqwest::Client, oauth_client: OAuth2Client) -> Self {
        Self {
            http_client,
            oauth_client,
        }
    }

    /// Performs an authenticated GET against the Discord API.
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
        path: &str,
    ) -> Result<T, AuthError> {
        let access_token = token.access_token().secret();

        self.http_client
            .get(format!("{}{}", DISCORD_API_URL, path))
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AuthError::ProfileFetch(e.to_string()))?
            .json::<T>()
            .await
            .map_err(|e| AuthError::ProfileFetch(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for DiscordAuthService {
    fn authorize_url(&self) -> (String, String) {
        let (authorize_url, csrf_state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("guilds".to_string()))
            .url();

        (authorize_url.to_string(), csrf_state.secret().clone())
    }

    async fn exchange(&self, code: String) -> Result<AuthUser, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let profile: ProfileResponse = self.get(&token, "/users/@me").await?;
        let guilds: Vec<GuildResponse> = self.get(&token, "/users/@me/guilds").await?;

        into_auth_user(profile, guilds)
            .map_err(|e| AuthError::ProfileFetch(e.to_string()).into())
    }
}

/// `GET /users/@me`
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    id: String,
    username: String,
    discriminator: Option<String>,
    global_name: Option<String>,
    avatar: Option<String>,
}

/// Entry of `GET /users/@me/guilds`
#[derive(Debug, Deserialize)]
struct GuildResponse {
    id: String,
    name: String,
    icon: Option<String>,
    owner: bool,
    /// Permission bits serialized as a decimal string.
    permissions: String,
}

fn into_auth_user(
    profile: ProfileResponse,
    guilds: Vec<GuildResponse>,
) -> Result<AuthUser, AppError> {
    let guilds = guilds
        .into_iter()
        .map(|guild| {
            Ok(UserGuild {
                id: parse_u64_from_string(&guild.id)?,
                name: guild.name,
                icon: guild.icon,
                owner: guild.owner,
                permissions: parse_u64_from_string(&guild.permissions)?,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(AuthUser {
        id: parse_u64_from_string(&profile.id)?,
        username: profile.username,
        // Migrated accounts report "0"
        discriminator: profile
            .discriminator
            .and_then(|discriminator| discriminator.parse::<u16>().ok())
            .filter(|discriminator| *discriminator != 0),
        global_name: profile.global_name,
        avatar: profile.avatar,
        guilds,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    fn profile(discriminator: &str) -> ProfileResponse {
        ProfileResponse {
            id: "80351110224678912".to_string(),
            username: "nelly".to_string(),
            discriminator: Some(discriminator.to_string()),
            global_name: Some("Nelly".to_string()),
            avatar: None,
        }
    }

    #[test]
    fn converts_profile_and_guilds() {
        let guilds = vec![GuildResponse {
            id: "1000".to_string(),
            name: "Guild".to_string(),
            icon: None,
            owner: false,
            permissions: "32".to_string(),
        }];

        let user = into_auth_user(profile("1337"), guilds).unwrap();

        assert_eq!(user.id, 80351110224678912);
        assert_eq!(user.discriminator, Some(1337));
        assert_eq!(user.guilds[0].id, 1000);
        assert!(user.guilds[0].can_manage());
    }

    #[test]
    fn migrated_accounts_have_no_discriminator() {
        let user = into_auth_user(profile("0"), vec![]).unwrap();
        assert_eq!(user.discriminator, None);
        assert_eq!(user.tag(), "nelly");
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let mut bad = profile("0");
        bad.id = "nope".to_string();
        assert!(into_auth_user(bad, vec![]).is_err());
    }
}
