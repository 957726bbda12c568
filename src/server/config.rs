use std::collections::BTreeMap;

use url::Url;

use crate::server::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_INVITE_URL: &str = "https://discord.com/oauth2/authorize";

const DEFAULT_PORT: u16 = 8003;
const DEFAULT_ASSETS_DIR: &str = "assets";
/// `ADMINISTRATOR`
const DEFAULT_INVITE_PERMISSIONS: u64 = 8;

/// Settings every guild starts with; stored overrides are applied on top.
const DEFAULT_GUILD_SETTINGS: &[(&str, &str)] = &[
    ("prefix", "~"),
    ("modLogChannel", "mod-log"),
    ("modRole", "Moderator"),
    ("adminRole", "Administrator"),
    ("systemNotice", "true"),
    ("welcomeEnabled", "false"),
    ("welcomeChannel", "welcome"),
    (
        "welcomeMessage",
        "Say hello to {{user}}, everyone! We all need a warm welcome sometimes :D",
    ),
];

/// Dashboard configuration, built once at startup and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,

    /// Public base URL of the dashboard.
    pub app_url: String,
    /// Host part of `app_url`, used to accept same-origin `Referer` headers at login.
    pub domain: String,
    /// Usernames granted the global admin flag at login.
    pub admins: Vec<String>,
    pub port: u16,
    pub assets_dir: String,
    /// Permission bits requested by the bot invite link.
    pub invite_permissions: u64,
    pub default_settings: BTreeMap<String, String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let app_url = required("APP_URL")?;
        let domain = domain_of(&app_url)?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required("DISCORD_REDIRECT_URL")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            app_url,
            domain,
            admins: parse_admins(&std::env::var("DASHBOARD_ADMINS").unwrap_or_default()),
            port: optional_parsed("DASHBOARD_PORT", DEFAULT_PORT)?,
            assets_dir: std::env::var("DASHBOARD_ASSETS_DIR")
                .unwrap_or_else(|_| DEFAULT_ASSETS_DIR.to_string()),
            invite_permissions: optional_parsed(
                "DISCORD_INVITE_PERMISSIONS",
                DEFAULT_INVITE_PERMISSIONS,
            )?,
            default_settings: default_guild_settings(),
        })
    }

    /// Whether `username` is on the global admin allow-list.
    pub fn is_admin(&self, username: &str) -> bool {
        self.admins.iter().any(|admin| admin == username)
    }

    /// Bot invite link, optionally pre-selecting a guild.
    pub fn invite_url(&self, guild_id: Option<u64>) -> String {
        let mut url = format!(
            "{}?client_id={}&scope=bot&permissions={}",
            DISCORD_INVITE_URL, self.discord_client_id, self.invite_permissions
        );
        if let Some(guild_id) = guild_id {
            url.push_str(&format!("&guild_id={}&disable_guild_select=true", guild_id));
        }
        url
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for route tests: admin `admin`, client id `1234`.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            discord_bot_token: String::new(),
            discord_client_id: "1234".to_string(),
            discord_client_secret: String::new(),
            discord_redirect_url: "http://localhost:8003/callback".to_string(),
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            app_url: "http://localhost:8003".to_string(),
            domain: "localhost".to_string(),
            admins: vec!["admin".to_string()],
            port: DEFAULT_PORT,
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            invite_permissions: DEFAULT_INVITE_PERMISSIONS,
            default_settings: default_guild_settings(),
        }
    }
}

/// Builds the default guild settings table.
pub fn default_guild_settings() -> BTreeMap<String, String> {
    DEFAULT_GUILD_SETTINGS
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

fn domain_of(app_url: &str) -> Result<String, ConfigError> {
    let url = Url::parse(app_url).map_err(|source| ConfigError::InvalidUrl {
        name: "APP_URL".to_string(),
        source,
    })?;

    url.host_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            value: app_url.to_string(),
        })
}

fn parse_admins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_admins() {
        assert_eq!(
            parse_admins(" alice, bob ,,carol "),
            vec!["alice".to_string(), "bob".to_string(), "carol".to_string()]
        );
        assert!(parse_admins("").is_empty());
    }

    #[test]
    fn extracts_domain_from_app_url() {
        assert_eq!(
            domain_of("https://dash.example.com:8443/").unwrap(),
            "dash.example.com"
        );
        assert!(domain_of("not a url").is_err());
    }

    #[test]
    fn builds_invite_url() {
        let config = Config::for_tests();

        assert_eq!(
            config.invite_url(None),
            "https://discord.com/oauth2/authorize?client_id=1234&scope=bot&permissions=8"
        );
        assert!(config
            .invite_url(Some(99))
            .ends_with("&guild_id=99&disable_guild_select=true"));
    }

    #[test]
    fn default_settings_include_prefix() {
        let defaults = default_guild_settings();
        assert_eq!(defaults.get("prefix").map(String::as_str), Some("~"));
        assert_eq!(defaults.len(), DEFAULT_GUILD_SETTINGS.len());
    }
}
