mod model;
mod server;

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::server::{
    bot, config::Config, error::AppError, router, service::oauth::DiscordAuthService, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;

    // Start the Discord bot in a separate task; the dashboard reads its cache
    let (bot_client, discord_bot) = bot::start::init_bot(&config, db.clone()).await?;
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let state = AppState::new(
        db,
        Arc::new(discord_bot),
        Arc::new(DiscordAuthService::new(http_client, oauth_client)),
        config.clone(),
    );

    let app = router::router(&config.assets_dir)
        .with_state(state)
        .layer(session)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Dashboard listening on port {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
