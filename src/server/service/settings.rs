use std::collections::BTreeMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::guild_setting::GuildSettingRepository, error::AppError, model::settings::GuildSettings,
};

/// Reads and writes guild settings on top of the configured defaults.
pub struct GuildSettingsService<'a> {
    db: &'a DatabaseConnection,
    defaults: &'a BTreeMap<String, String>,
}

impl<'a> GuildSettingsService<'a> {
    pub fn new(db: &'a DatabaseConnection, defaults: &'a BTreeMap<String, String>) -> Self {
        Self { db, defaults }
    }

    /// Effective settings of a guild: defaults with its stored overrides applied.
    pub async fn get(&self, guild_id: u64) -> Result<GuildSettings, AppError> {
        let repo = GuildSettingRepository::new(self.db);

        let overrides: BTreeMap<String, String> = repo
            .find_by_guild(guild_id)
            .await?
            .into_iter()
            .map(|row| (row.key, row.value))
            .collect();

        Ok(GuildSettings::merge(guild_id, self.defaults, overrides))
    }

    /// Applies submitted form pairs to a guild's settings.
    ///
    /// Keys are not interpreted. When a key is submitted more than once the last value
    /// wins, and a value equal to the key's default removes the override.
    ///
    /// # Returns
    /// - `Ok(())` - All pairs applied
    /// - `Err(AppError::DbErr)` - Database error while writing
    pub async fn write(&self, guild_id: u64, pairs: Vec<(String, String)>) -> Result<(), AppError> {
        let repo = GuildSettingRepository::new(self.db);

        let submitted: BTreeMap<String, String> = pairs.into_iter().collect();
        for (key, value) in &submitted {
            if self.defaults.get(key) == Some(value) {
                repo.delete_key(guild_id, key).await?;
            } else {
                repo.upsert(guild_id, key, value).await?;
            }
        }

        tracing::info!("Updated {} settings of guild {}", submitted.len(), guild_id);

        Ok(())
    }

    /// Deletes every override of a guild so it falls back to the defaults.
    pub async fn reset(&self, guild_id: u64) -> Result<(), AppError> {
        let repo = GuildSettingRepository::new(self.db);
        let removed = repo.delete_by_guild(guild_id).await?;

        tracing::info!("Reset settings of guild {} ({} overrides removed)", guild_id, removed);

        Ok(())
    }
}
