use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::Uri, response::IntoResponse};

use crate::server::{
    bot::command::{self, CommandInfo},
    middleware::auth::OptionalUser,
    model::stats::BotStats,
    service::stats::StatsService,
    state::AppState,
    view::{render_markdown, PageContext},
};

const API_DOCS: &str = include_str!("../../../docs/api.md");

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: PageContext,
    pub bot_name: Option<String>,
    pub guild_count: usize,
}

/// A command as listed on `/commands`.
pub struct CommandView {
    pub usage: &'static str,
    pub description_html: String,
}

pub struct CommandCategory {
    pub name: &'static str,
    pub commands: Vec<CommandView>,
}

#[derive(Template, WebTemplate)]
#[template(path = "commands.html")]
pub struct CommandsTemplate {
    pub page: PageContext,
    pub prefix: String,
    pub categories: Vec<CommandCategory>,
}

#[derive(Template, WebTemplate)]
#[template(path = "api.html")]
pub struct ApiTemplate {
    pub page: PageContext,
    pub content_html: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "stats.html")]
pub struct StatsTemplate {
    pub page: PageContext,
    pub stats: BotStats,
}

pub async fn index(
    State(state): State<AppState>,
    OptionalUser(current): OptionalUser,
    uri: Uri,
) -> impl IntoResponse {
    IndexTemplate {
        page: PageContext::new(uri.path(), current.as_ref()),
        bot_name: state.bot.current_user().map(|user| user.username),
        guild_count: state.bot.guilds().len(),
    }
}

pub async fn commands(
    State(state): State<AppState>,
    OptionalUser(current): OptionalUser,
    uri: Uri,
) -> impl IntoResponse {
    let categories = command::by_category()
        .into_iter()
        .map(|(name, commands)| CommandCategory {
            name,
            commands: commands.into_iter().map(command_view).collect(),
        })
        .collect();

    CommandsTemplate {
        page: PageContext::new(uri.path(), current.as_ref()),
        prefix: state
            .config
            .default_settings
            .get("prefix")
            .cloned()
            .unwrap_or_default(),
        categories,
    }
}

fn command_view(command: &CommandInfo) -> CommandView {
    CommandView {
        usage: command.usage,
        description_html: render_markdown(command.description),
    }
}

pub async fn api(OptionalUser(current): OptionalUser, uri: Uri) -> impl IntoResponse {
    ApiTemplate {
        page: PageContext::new(uri.path(), current.as_ref()),
        content_html: render_markdown(API_DOCS),
    }
}

pub async fn stats(
    State(state): State<AppState>,
    OptionalUser(current): OptionalUser,
    uri: Uri,
) -> impl IntoResponse {
    StatsTemplate {
        page: PageContext::new(uri.path(), current.as_ref()),
        stats: StatsService::new(&*state.bot).bot_stats(),
    }
}
