use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildSetting::Table)
                    .if_not_exists()
                    .col(string(GuildSetting::GuildId))
                    .col(string(GuildSetting::Key))
                    .col(text(GuildSetting::Value))
                    .col(timestamp_with_time_zone(GuildSetting::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .col(GuildSetting::GuildId)
                            .col(GuildSetting::Key),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildSetting::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildSetting {
    Table,
    GuildId,
    Key,
    Value,
    UpdatedAt,
}
