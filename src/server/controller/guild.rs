//! Per-guild management pages.
//!
//! Every handler resolves the guild through `GuildService::authorize` before doing
//! anything else, so an unknown id is a 404 and a user without manage permission is sent
//! back to `/`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Redirect},
    Form,
};

use crate::server::{
    error::AppError,
    middleware::auth::RequireAuth,
    model::{
        discord::Guild,
        settings::{GuildSettings, SettingEntry},
        stats::GuildStats,
    },
    service::{
        guild::{channel_tree, ChannelGroup, GuildService},
        settings::GuildSettingsService,
        stats::StatsService,
    },
    state::AppState,
    view::PageContext,
};

#[derive(Template, WebTemplate)]
#[template(path = "manage.html")]
pub struct ManageTemplate {
    pub page: PageContext,
    pub guild: Guild,
    pub settings: GuildSettings,
}

#[derive(Template, WebTemplate)]
#[template(path = "channels.html")]
pub struct ChannelsTemplate {
    pub page: PageContext,
    pub guild: Guild,
    pub groups: Vec<ChannelGroup>,
}

#[derive(Template, WebTemplate)]
#[template(path = "guild_stats.html")]
pub struct GuildStatsTemplate {
    pub page: PageContext,
    pub guild: Guild,
    pub stats: GuildStats,
}

#[derive(Template, WebTemplate)]
#[template(path = "modules.html")]
pub struct ModulesTemplate {
    pub page: PageContext,
    pub guild: Guild,
    pub toggles: Vec<SettingEntry>,
}

fn manage_path(guild: &Guild) -> String {
    format!("/dashboard/{}/manage", guild.id)
}

/// Bare guild URL.
///
/// # Returns
/// - `303 See Other` - To `/dashboard/{id}/manage`
/// - `404 Not Found` - Unknown guild
pub async fn redirect_to_manage(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(guild_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guild =
        GuildService::new(&*state.bot).authorize(&guild_id, &current.user, current.is_admin)?;

    Ok(Redirect::to(&manage_path(&guild)))
}

/// Settings form for a guild.
///
/// # Returns
/// - `200 OK` - Settings page, stored values merged over the defaults
/// - `404 Not Found` - Unknown guild
pub async fn manage(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    uri: Uri,
    Path(guild_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guild =
        GuildService::new(&*state.bot).authorize(&guild_id, &current.user, current.is_admin)?;
    let settings = GuildSettingsService::new(&state.db, &state.config.default_settings)
        .get(guild.id)
        .await?;

    Ok(ManageTemplate {
        page: PageContext::new(uri.path(), Some(&current)),
        guild,
        settings,
    })
}

/// Stores the submitted settings.
///
/// Pairs are passed through in submission order; for a repeated key the last value wins.
///
/// # Returns
/// - `303 See Other` - Back to the settings page
/// - `404 Not Found` - Unknown guild
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(guild_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let guild =
        GuildService::new(&*state.bot).authorize(&guild_id, &current.user, current.is_admin)?;

    GuildSettingsService::new(&state.db, &state.config.default_settings)
        .write(guild.id, pairs)
        .await?;

    Ok(Redirect::to(&manage_path(&guild)))
}

/// Channels grouped under their categories.
///
/// # Returns
/// - `200 OK` - Channel tree page
/// - `404 Not Found` - Unknown guild
pub async fn channels(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    uri: Uri,
    Path(guild_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guild =
        GuildService::new(&*state.bot).authorize(&guild_id, &current.user, current.is_admin)?;

    Ok(ChannelsTemplate {
        page: PageContext::new(uri.path(), Some(&current)),
        groups: channel_tree(&guild),
        guild,
    })
}

/// Member and channel counts for a guild.
pub async fn stats(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    uri: Uri,
    Path(guild_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guild =
        GuildService::new(&*state.bot).authorize(&guild_id, &current.user, current.is_admin)?;

    Ok(GuildStatsTemplate {
        page: PageContext::new(uri.path(), Some(&current)),
        stats: StatsService::guild_stats(&guild),
        guild,
    })
}

/// Boolean settings of a guild, shown as module toggles.
pub async fn modules(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    uri: Uri,
    Path(guild_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guild =
        GuildService::new(&*state.bot).authorize(&guild_id, &current.user, current.is_admin)?;
    let settings = GuildSettingsService::new(&state.db, &state.config.default_settings)
        .get(guild.id)
        .await?;

    Ok(ModulesTemplate {
        page: PageContext::new(uri.path(), Some(&current)),
        guild,
        toggles: settings.toggles().cloned().collect(),
    })
}

/// Makes the bot leave the guild.
///
/// # Returns
/// - `303 See Other` - To `/dashboard`
/// - `404 Not Found` - Unknown guild
pub async fn leave(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(guild_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = GuildService::new(&*state.bot);
    let guild = service.authorize(&guild_id, &current.user, current.is_admin)?;

    service.leave(&guild).await?;

    Ok(Redirect::to("/dashboard"))
}

/// Removes the stored settings so the defaults apply again.
///
/// # Returns
/// - `303 See Other` - To `/dashboard/{id}`
/// - `404 Not Found` - Unknown guild
pub async fn reset(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(guild_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guild =
        GuildService::new(&*state.bot).authorize(&guild_id, &current.user, current.is_admin)?;

    GuildSettingsService::new(&state.db, &state.config.default_settings)
        .reset(guild.id)
        .await?;

    Ok(Redirect::to(&format!("/dashboard/{}", guild.id)))
}
