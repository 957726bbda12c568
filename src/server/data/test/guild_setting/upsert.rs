use super::*;

/// Tests inserting a new override.
///
/// Expected: Ok with the row stored
#[tokio::test]
async fn inserts_new_override() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingRepository::new(db);
    let row = repo.upsert(1000, "prefix", "!").await?;

    assert_eq!(row.guild_id, "1000");
    assert_eq!(row.key, "prefix");
    assert_eq!(row.value, "!");

    Ok(())
}

/// Tests that upserting an existing key replaces its value instead of adding a row.
///
/// Expected: Ok with a single updated row
#[tokio::test]
async fn replaces_existing_value() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_setting::GuildSettingFactory::new(db)
        .guild_id("1000")
        .key("prefix")
        .value("!")
        .build()
        .await?;

    let repo = GuildSettingRepository::new(db);
    let row = repo.upsert(1000, "prefix", "$").await?;
    assert_eq!(row.value, "$");

    let count = entity::prelude::GuildSetting::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
