//! Authenticated dashboard user.
//!
//! The user is built from Discord's OAuth2 profile and guild list at login and stored in
//! the session for the rest of its lifetime.

use serde::{Deserialize, Serialize};
use serenity::all::Permissions;

use crate::server::model::discord::guild::has_manage_permission;

const CDN_URL: &str = "https://cdn.discordapp.com";

/// Identity returned by the OAuth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: u64,
    pub username: String,
    /// Legacy discriminator; `None` for accounts migrated to unique usernames.
    pub discriminator: Option<u16>,
    pub global_name: Option<String>,
    /// Avatar hash, if the user has uploaded one.
    pub avatar: Option<String>,
    /// Guilds the user belongs to, as reported by the `guilds` scope.
    pub guilds: Vec<UserGuild>,
}

impl AuthUser {
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }

    /// `username#discriminator`, or the bare username for migrated accounts.
    pub fn tag(&self) -> String {
        match self.discriminator {
            Some(discriminator) => format!("{}#{:04}", self.username, discriminator),
            None => self.username.clone(),
        }
    }

    /// CDN URL of the user's avatar, or Discord's default avatar.
    pub fn avatar_url(&self) -> String {
        match (&self.avatar, self.discriminator) {
            (Some(hash), _) => format!("{}/avatars/{}/{}.png", CDN_URL, self.id, hash),
            (None, Some(discriminator)) => {
                format!("{}/embed/avatars/{}.png", CDN_URL, discriminator % 5)
            }
            (None, None) => format!("{}/embed/avatars/{}.png", CDN_URL, (self.id >> 22) % 6),
        }
    }

    pub fn guild(&self, guild_id: u64) -> Option<&UserGuild> {
        self.guilds.iter().find(|guild| guild.id == guild_id)
    }

    /// Guilds where the OAuth-reported permissions allow management.
    pub fn manageable_guilds(&self) -> impl Iterator<Item = &UserGuild> {
        self.guilds.iter().filter(|guild| guild.can_manage())
    }
}

/// A guild entry from the user's OAuth guild list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGuild {
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
    pub owner: bool,
    /// Raw permission bits of the user in this guild.
    pub permissions: u64,
}

impl UserGuild {
    pub fn can_manage(&self) -> bool {
        self.owner || has_manage_permission(Permissions::from_bits_truncate(self.permissions))
    }

    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|hash| format!("{}/icons/{}/{}.png", CDN_URL, self.id, hash))
    }
}
