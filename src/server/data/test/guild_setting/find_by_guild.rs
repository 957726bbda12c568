use super::*;

/// Tests that only the requested guild's overrides are returned.
///
/// Expected: Ok with the two rows of guild 1000
#[tokio::test]
async fn returns_overrides_for_guild_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_setting::create_guild_setting(db, "1000", "prefix", "!").await?;
    factory::guild_setting::create_guild_setting(db, "1000", "modRole", "Mods").await?;
    factory::guild_setting::create_guild_setting(db, "2000", "prefix", "?").await?;

    let repo = GuildSettingRepository::new(db);
    let mut rows = repo.find_by_guild(1000).await?;
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].key, "modRole");
    assert_eq!(rows[1].value, "!");

    Ok(())
}

/// Tests that a guild without overrides yields an empty list.
///
/// Expected: Ok with no rows
#[tokio::test]
async fn returns_empty_for_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingRepository::new(db);
    assert!(repo.find_by_guild(42).await?.is_empty());

    Ok(())
}
