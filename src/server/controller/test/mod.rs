//! Route tests driving the real router with an in-memory bot, a fake identity provider and
//! a memory session store.

mod member;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, REFERER, SET_COOKIE},
        Request, Response, StatusCode,
    },
    Router,
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serenity::all::Permissions;
use test_utils::{builder::TestBuilder, error::TestError};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::server::{
    bot::memory::{fixture, InMemoryBot},
    config::Config,
    model::{
        discord::Guild,
        user::{AuthUser, UserGuild},
    },
    router::router,
    service::oauth::fake::{FakeIdentityProvider, CSRF_STATE, VALID_CODE},
    startup::SESSION_COOKIE_NAME,
    state::AppState,
};

pub const GUILD_ID: u64 = 1000;
pub const OWNER_ID: u64 = 10;

/// Guild owned by `OWNER_ID` with members alice, albert and bob; the owner is not cached.
pub fn guild() -> Guild {
    fixture::guild(
        GUILD_ID,
        "Test Guild",
        OWNER_ID,
        vec![
            fixture::member(101, "alice"),
            fixture::member(102, "albert"),
            fixture::member(103, "bob"),
        ],
    )
}

pub fn auth_user(id: u64, username: &str, guilds: Vec<UserGuild>) -> AuthUser {
    AuthUser {
        id,
        username: username.to_string(),
        discriminator: None,
        global_name: None,
        avatar: None,
        guilds,
    }
}

/// Owner of `guild()` according to the OAuth guild list.
pub fn owner() -> AuthUser {
    auth_user(
        OWNER_ID,
        "owner",
        vec![UserGuild {
            id: GUILD_ID,
            name: "Test Guild".to_string(),
            icon: None,
            owner: true,
            permissions: Permissions::all().bits(),
        }],
    )
}

/// Member of `guild()` without manage permission.
pub fn stranger() -> AuthUser {
    auth_user(
        30,
        "stranger",
        vec![UserGuild {
            id: GUILD_ID,
            name: "Test Guild".to_string(),
            icon: None,
            owner: false,
            permissions: Permissions::SEND_MESSAGES.bits(),
        }],
    )
}

/// Global admin by username, not a member of any guild.
pub fn admin() -> AuthUser {
    auth_user(20, "admin", vec![])
}

/// A browser against the router that keeps the session cookie between requests.
pub struct TestApp {
    router: Router,
    pub bot: Arc<InMemoryBot>,
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    cookie: Option<String>,
}

impl TestApp {
    /// Builds the app with `bot`; `user` is who the identity provider signs in.
    pub async fn new(bot: InMemoryBot, user: AuthUser) -> Result<Self, TestError> {
        let mut test = TestBuilder::new().with_settings_tables().build().await?;
        let db = test.database().await?.clone();

        let bot = Arc::new(bot);
        let config = Arc::new(Config::for_tests());
        let state = AppState::new(
            db.clone(),
            bot.clone(),
            Arc::new(FakeIdentityProvider { user }),
            config.clone(),
        );

        let session = SessionManagerLayer::new(MemoryStore::default())
            .with_name(SESSION_COOKIE_NAME)
            .with_secure(false);

        let router = router(&config.assets_dir).with_state(state).layer(session);

        Ok(Self {
            router,
            bot,
            db,
            config,
            cookie: None,
        })
    }

    /// App with `guild()` and `user` as the identity.
    pub async fn with_user(user: AuthUser) -> Result<Self, TestError> {
        Self::new(InMemoryBot::new().with_guild(guild()), user).await
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri)).await
    }

    pub async fn get_with_referer(&mut self, uri: &str, referer: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).header(REFERER, referer))
            .await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send_body(request, Body::from(body.to_string())).await
    }

    /// Runs the OAuth flow, returning the callback's redirect target.
    pub async fn login(&mut self) -> String {
        let response = self.get("/login").await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

        let response = self
            .get(&format!("/callback?state={}&code={}", CSRF_STATE, VALID_CODE))
            .await;
        location(&response)
    }

    async fn send(&mut self, request: axum::http::request::Builder) -> Response<Body> {
        self.send_body(request, Body::empty()).await
    }

    async fn send_body(
        &mut self,
        mut request: axum::http::request::Builder,
        body: Body,
    ) -> Response<Body> {
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        for set_cookie in response.headers().get_all(SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .trim()
                .to_string();
            let (name, value) = pair.split_once('=').unwrap();
            if name == SESSION_COOKIE_NAME {
                self.cookie = (!value.is_empty()).then_some(pair.clone());
            }
        }

        response
    }
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(LOCATION)
        .map(|location| location.to_str().unwrap().to_string())
        .unwrap_or_default()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
