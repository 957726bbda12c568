use axum::http::StatusCode;
use serde_json::Value;
use test_utils::error::TestError;

use super::*;

#[tokio::test]
async fn filters_sorts_and_paginates() -> Result<(), TestError> {
    let mut app = TestApp::with_user(owner()).await?;
    app.login().await;

    let response = app
        .get("/dashboard/1000/members/list?filter=al&sortby=username&start=0&limit=2")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(json["page"], 1);
    assert_eq!(json["pageof"], 1);

    let usernames: Vec<&str> = json["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|member| member["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["albert", "alice"]);
    assert_eq!(json["members"][0]["id"], "102");
    assert_eq!(json["members"][0]["highestRole"]["hexColor"], "#000000");

    Ok(())
}

#[tokio::test]
async fn unknown_sort_field_is_rejected() -> Result<(), TestError> {
    let mut app = TestApp::with_user(owner()).await?;
    app.login().await;

    let response = app.get("/dashboard/1000/members/list?sortby=nickname").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn fetch_refreshes_members_first() -> Result<(), TestError> {
    let bot = InMemoryBot::new()
        .with_guild(guild())
        .with_refreshed_members(GUILD_ID, vec![fixture::member(104, "carol")]);
    let mut app = TestApp::new(bot, owner()).await?;
    app.login().await;

    let response = app.get("/dashboard/1000/members/list?fetch=1").await;
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();

    assert_eq!(json["total"], 1);
    assert_eq!(json["members"][0]["username"], "carol");
    assert_eq!(app.bot.fetched(), vec![GUILD_ID]);

    Ok(())
}

#[tokio::test]
async fn member_list_requires_login() -> Result<(), TestError> {
    let mut app = TestApp::with_user(owner()).await?;

    let response = app.get("/dashboard/1000/members/list").await;
    assert_eq!(location(&response), "/login");

    let response = app.get("/dashboard/1000/members/list?sortby=nickname").await;
    assert_eq!(location(&response), "/login");

    Ok(())
}
