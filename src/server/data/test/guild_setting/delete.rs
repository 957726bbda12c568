use super::*;

/// Tests deleting a single override key.
///
/// Expected: Ok(1) and the other key untouched
#[tokio::test]
async fn deletes_single_key() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_setting::create_guild_setting(db, "1000", "prefix", "!").await?;
    factory::guild_setting::create_guild_setting(db, "1000", "modRole", "Mods").await?;

    let repo = GuildSettingRepository::new(db);
    assert_eq!(repo.delete_key(1000, "prefix").await?, 1);
    assert_eq!(repo.delete_key(1000, "prefix").await?, 0);

    let rows = repo.find_by_guild(1000).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, "modRole");

    Ok(())
}

/// Tests that resetting a guild removes all of its overrides and nothing else.
///
/// Expected: Ok(2) with the other guild's row remaining
#[tokio::test]
async fn deletes_all_overrides_of_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_setting::create_guild_setting(db, "1000", "prefix", "!").await?;
    factory::guild_setting::create_guild_setting(db, "1000", "modRole", "Mods").await?;
    factory::guild_setting::create_guild_setting(db, "2000", "prefix", "?").await?;

    let repo = GuildSettingRepository::new(db);
    assert_eq!(repo.delete_by_guild(1000).await?, 2);

    let remaining = entity::prelude::GuildSetting::find().count(db).await?;
    assert_eq!(remaining, 1);

    Ok(())
}
