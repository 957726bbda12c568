use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

/// Stores per-guild settings overrides.
///
/// Guild ids are stored as strings since SQLite integers are signed.
pub struct GuildSettingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns every override stored for a guild.
    pub async fn find_by_guild(
        &self,
        guild_id: u64,
    ) -> Result<Vec<entity::guild_setting::Model>, DbErr> {
        entity::prelude::GuildSetting::find()
            .filter(entity::guild_setting::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await
    }

    /// Inserts an override or replaces the value of an existing one.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild id
    /// - `key` - Setting name
    /// - `value` - New value
    ///
    /// # Returns
    /// - `Ok(Model)` - The stored row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn upsert(
        &self,
        guild_id: u64,
        key: &str,
        value: &str,
    ) -> Result<entity::guild_setting::Model, DbErr> {
        entity::prelude::GuildSetting::insert(entity::guild_setting::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(value.to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                entity::guild_setting::Column::GuildId,
                entity::guild_setting::Column::Key,
            ])
            .update_columns([
                entity::guild_setting::Column::Value,
                entity::guild_setting::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await
    }

    /// Deletes a single override, returning the number of rows removed.
    pub async fn delete_key(&self, guild_id: u64, key: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::GuildSetting::delete_many()
            .filter(entity::guild_setting::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_setting::Column::Key.eq(key))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every override of a guild, returning the number of rows removed.
    pub async fn delete_by_guild(&self, guild_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::GuildSetting::delete_many()
            .filter(entity::guild_setting::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
