use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::{header::REFERER, HeaderMap, Uri},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use url::Url;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{auth::OptionalUser, session::AuthSession},
    state::AppState,
    view::PageContext,
};

/// Query parameters Discord appends to the OAuth callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: Option<String>,
    /// Authorization code used to exchange for an access token.
    pub code: Option<String>,
    /// Set instead of `code` when the user denied consent.
    pub error: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "autherror.html")]
pub struct AuthErrorTemplate {
    pub page: PageContext,
}

/// Starts the OAuth flow.
///
/// The post-login destination is an already pending `back_url`, else the path of a
/// same-host `Referer`, else `/`.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let auth_session = AuthSession::new(&session);
    let mut dashboard = auth_session.load().await?;

    if dashboard.back_url.is_none() {
        let back_url = headers
            .get(REFERER)
            .and_then(|referer| referer.to_str().ok())
            .and_then(|referer| same_host_path(referer, &state.config.domain))
            .unwrap_or_else(|| "/".to_string());
        dashboard.remember_back_url(back_url);
    }

    let (url, csrf_token) = state.identity.authorize_url();
    dashboard.begin_login(csrf_token);
    auth_session.save(&dashboard).await?;

    Ok(Redirect::temporary(&url))
}

/// Completes the OAuth flow and redirects to the captured destination.
///
/// Every provider failure redirects to `/autherror`.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let result = complete_login(&state, &session, params).await;

    if let Err(AppError::AuthErr(ref e)) = result {
        tracing::warn!("Discord login failed: {}", e);
    }

    Ok(Redirect::to(&result?))
}

async fn complete_login(
    state: &AppState,
    session: &Session,
    params: CallbackParams,
) -> Result<String, AppError> {
    if let Some(error) = params.error {
        return Err(AuthError::ProviderDenied(error).into());
    }

    let Some(code) = params.code else {
        return Err(AuthError::MissingAuthorizationCode.into());
    };

    let auth_session = AuthSession::new(session);
    let mut dashboard = auth_session.load().await?;

    let csrf_matches = dashboard.take_csrf_match(params.state.as_deref().unwrap_or_default());
    auth_session.save(&dashboard).await?;
    if !csrf_matches {
        return Err(AuthError::CsrfValidationFailed.into());
    }

    let user = state.identity.exchange(code).await?;
    let is_admin = state.config.is_admin(&user.username);

    tracing::info!(
        "User {} ({}) logged in{}",
        user.username,
        user.id,
        if is_admin { " as admin" } else { "" }
    );

    let target = dashboard.complete_login(user, is_admin);

    // New identity, new session id
    session.cycle_id().await?;
    auth_session.save(&dashboard).await?;

    Ok(target)
}

pub async fn autherror(OptionalUser(current): OptionalUser, uri: Uri) -> impl IntoResponse {
    AuthErrorTemplate {
        page: PageContext::new(uri.path(), current.as_ref()),
    }
}

/// Destroys the session unconditionally.
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    let auth_session = AuthSession::new(&session);

    let mut dashboard = auth_session.load().await.unwrap_or_default();
    if let Some(user) = &dashboard.user {
        tracing::info!("User {} ({}) logged out", user.username, user.id);
    }
    dashboard.logout();
    auth_session.destroy().await?;

    Ok(Redirect::to("/"))
}

/// Path and query of `referer` if its host is `domain`.
///
/// A path starting with `//` is rejected, browsers read it as another host.
fn same_host_path(referer: &str, domain: &str) -> Option<String> {
    let url = Url::parse(referer).ok()?;
    if url.host_str()? != domain || url.path().starts_with("//") {
        return None;
    }

    let mut path = url.path().to_string();
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }
    Some(path)
}
