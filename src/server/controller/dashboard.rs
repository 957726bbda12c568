use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::Uri,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::server::{
    middleware::auth::{RequireAdmin, RequireAuth},
    model::{discord::Guild, discord::DiscordUser, stats::BotStats},
    service::{
        guild::{DashboardGuild, GuildService},
        stats::StatsService,
    },
    state::AppState,
    util::parse::parse_snowflake,
    view::PageContext,
};

#[derive(Debug, Default, Deserialize)]
pub struct InviteParams {
    pub guild_id: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "invite.html")]
pub struct InviteTemplate {
    pub page: PageContext,
    pub invite_url: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub page: PageContext,
    pub guilds: Vec<DashboardGuild>,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub page: PageContext,
    pub guilds: Vec<Guild>,
}

#[derive(Template, WebTemplate)]
#[template(path = "botadmin.html")]
pub struct BotAdminTemplate {
    pub page: PageContext,
    pub bot_user: Option<DiscordUser>,
    pub admins: Vec<String>,
    pub stats: BotStats,
}

/// Bot invite link; an invalid `guild_id` is ignored.
pub async fn invite(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    uri: Uri,
    Query(params): Query<InviteParams>,
) -> impl IntoResponse {
    let guild_id = params.guild_id.as_deref().and_then(parse_snowflake);

    InviteTemplate {
        page: PageContext::new(uri.path(), Some(&current)),
        invite_url: state.config.invite_url(guild_id),
    }
}

pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    uri: Uri,
) -> impl IntoResponse {
    let guilds = GuildService::new(&*state.bot).manageable_guilds(&current.user);

    DashboardTemplate {
        page: PageContext::new(uri.path(), Some(&current)),
        guilds,
    }
}

/// Every guild the bot is in.
pub async fn admin(
    State(state): State<AppState>,
    RequireAdmin(current): RequireAdmin,
    uri: Uri,
) -> impl IntoResponse {
    let mut guilds = state.bot.guilds();
    guilds.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    AdminTemplate {
        page: PageContext::new(uri.path(), Some(&current)),
        guilds,
    }
}

pub async fn botadmin(
    State(state): State<AppState>,
    RequireAdmin(current): RequireAdmin,
    uri: Uri,
) -> impl IntoResponse {
    BotAdminTemplate {
        page: PageContext::new(uri.path(), Some(&current)),
        bot_user: state.bot.current_user(),
        admins: state.config.admins.clone(),
        stats: StatsService::new(&*state.bot).bot_stats(),
    }
}
