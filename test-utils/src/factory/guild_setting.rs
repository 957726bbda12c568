//! Guild settings override factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for inserting guild settings overrides.
pub struct GuildSettingFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    key: String,
    value: String,
}

impl<'a> GuildSettingFactory<'a> {
    /// Creates a factory with defaults: guild `"1"`, key `"prefix"`, value `"!"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: "1".to_string(),
            key: "prefix".to_string(),
            value: "!".to_string(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Inserts the override row.
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted row
    /// - `Err(DbErr)` - Insert failed, e.g. the key already exists for the guild
    pub async fn build(self) -> Result<entity::guild_setting::Model, DbErr> {
        entity::guild_setting::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            key: ActiveValue::Set(self.key),
            value: ActiveValue::Set(self.value),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Inserts a single override for `guild_id` with the given key and value.
pub async fn create_guild_setting(
    db: &DatabaseConnection,
    guild_id: &str,
    key: &str,
    value: &str,
) -> Result<entity::guild_setting::Model, DbErr> {
    GuildSettingFactory::new(db)
        .guild_id(guild_id)
        .key(key)
        .value(value)
        .build()
        .await
}
