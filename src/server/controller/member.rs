use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::IntoResponse,
    Json,
};

use crate::server::{
    error::AppError,
    middleware::auth::RequireAuth,
    model::{
        discord::Guild,
        member_list::{MemberListParam, MemberListQuery},
    },
    service::{guild::GuildService, member_list::MemberListService},
    state::AppState,
    view::PageContext,
};

#[derive(Template, WebTemplate)]
#[template(path = "members.html")]
pub struct MembersTemplate {
    pub page: PageContext,
    pub guild: Guild,
}

/// Member page shell; the table is loaded from `members/list`.
pub async fn members(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    uri: Uri,
    Path(guild_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guild =
        GuildService::new(&*state.bot).authorize(&guild_id, &current.user, current.is_admin)?;

    Ok(MembersTemplate {
        page: PageContext::new(uri.path(), Some(&current)),
        guild,
    })
}

/// Filtered, sorted and paginated member list as JSON.
///
/// # Returns
/// - `200 OK` - `MemberListDto`
/// - `400 Bad Request` - Unknown `sortby` field
/// - `404 Not Found` - Unknown guild
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(guild_id): Path<String>,
    Query(query): Query<MemberListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let guild =
        GuildService::new(&*state.bot).authorize(&guild_id, &current.user, current.is_admin)?;
    let param = MemberListParam::try_from(query)?;

    let members = MemberListService::new(&*state.bot)
        .list(guild, &param)
        .await?;

    Ok(Json(members))
}
