use axum::{middleware, routing::get, Router};
use tower_http::services::ServeDir;

use crate::server::{
    controller::{auth, dashboard, guild, member, page},
    middleware::security_headers::security_headers,
    state::AppState,
};

/// Builds the route table.
///
/// Every response, static assets included, carries the security headers.
///
/// # Arguments
/// - `assets_dir` - Directory served unmodified under `/assets`
pub fn router(assets_dir: &str) -> Router<AppState> {
    Router::new()
        .route("/", get(page::index))
        .route("/commands", get(page::commands))
        .route("/api", get(page::api))
        .route("/stats", get(page::stats))
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/autherror", get(auth::autherror))
        .route("/logout", get(auth::logout))
        .route("/invite", get(dashboard::invite))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/admin", get(dashboard::admin))
        .route("/botadmin", get(dashboard::botadmin))
        .route("/dashboard/{guild_id}", get(guild::redirect_to_manage))
        .route(
            "/dashboard/{guild_id}/manage",
            get(guild::manage).post(guild::update),
        )
        .route("/dashboard/{guild_id}/members", get(member::members))
        .route("/dashboard/{guild_id}/members/list", get(member::list))
        .route("/dashboard/{guild_id}/c", get(guild::channels))
        .route("/dashboard/{guild_id}/stats", get(guild::stats))
        .route("/dashboard/{guild_id}/modules", get(guild::modules))
        .route("/dashboard/{guild_id}/leave", get(guild::leave))
        .route("/dashboard/{guild_id}/reset", get(guild::reset))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .layer(middleware::from_fn(security_headers))
}
