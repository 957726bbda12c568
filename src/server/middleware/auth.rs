//! Authentication extractors.
//!
//! `RequireAuth` gates management pages: without a signed-in user it records the requested
//! path as the post-login destination and redirects to `/login`.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::AuthUser,
};

/// The signed-in user of a request.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub user: AuthUser,
    /// Global admin flag; bypasses per-guild permission checks.
    pub is_admin: bool,
}

/// Extractor that requires a signed-in user.
pub struct RequireAuth(pub CurrentUser);

/// Extractor that requires a signed-in global admin.
///
/// Signed-in users without the flag are redirected to `/dashboard`.
pub struct RequireAdmin(pub CurrentUser);

/// Extractor for pages that render for guests and users alike.
pub struct OptionalUser(pub Option<CurrentUser>);

/// Error returned when a request must sign in first.
pub enum AuthRejection {
    /// Redirect to the login page; the requested path has been stored.
    RedirectToLogin,
    /// Session unavailable or unreadable.
    Session(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Session(err) => err.into_response(),
        }
    }
}

fn session_of(parts: &Parts) -> Result<Session, AppError> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("Session layer is missing".to_string()))
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_of(parts).map_err(AuthRejection::Session)?;
        let auth_session = AuthSession::new(&session);

        let mut state = auth_session.load().await.map_err(AuthRejection::Session)?;

        if let Some(user) = state.user {
            return Ok(Self(CurrentUser {
                user,
                is_admin: state.is_admin,
            }));
        }

        let requested = parts
            .uri
            .path_and_query()
            .map(|path| path.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        state.remember_back_url(requested);
        auth_session
            .save(&state)
            .await
            .map_err(AuthRejection::Session)?;

        Err(AuthRejection::RedirectToLogin)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(current) = RequireAuth::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if !current.is_admin {
            return Err(AppError::from(AuthError::AdminRequired(current.user.id)).into_response());
        }

        Ok(Self(current))
    }
}

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Ok(session) = session_of(parts) else {
            return Ok(Self(None));
        };

        let current = AuthSession::new(&session)
            .load()
            .await
            .ok()
            .and_then(|state| {
                state.user.map(|user| CurrentUser {
                    user,
                    is_admin: state.is_admin,
                })
            });

        Ok(Self(current))
    }
}
