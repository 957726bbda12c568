use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during OAuth callback.
    ///
    /// The state returned by Discord does not match the token stored in the session,
    /// or no login was started from this session.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Discord redirected back without an authorization code.
    #[error("OAuth callback is missing the authorization code")]
    MissingAuthorizationCode,

    /// Discord reported an error on the callback, e.g. the user denied consent.
    #[error("Discord denied the authorization request: {0}")]
    ProviderDenied(String),

    /// Exchanging the authorization code for an access token failed.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),

    /// Fetching the user's profile or guild list with the access token failed.
    #[error("Failed to fetch Discord profile: {0}")]
    ProfileFetch(String),

    /// Authenticated user lacks manage permission for the guild.
    ///
    /// # Fields
    /// - Discord ID of the user
    /// - Discord ID of the guild
    #[error("User {0} does not have manage permission for guild {1}")]
    AccessDenied(u64, u64),

    /// Authenticated user attempted to open a page reserved to global admins.
    #[error("User {0} attempted to access an admin page without admin permissions")]
    AdminRequired(u64),
}

impl AuthError {
    /// Whether this error was raised by the OAuth login flow itself.
    pub fn is_login_failure(&self) -> bool {
        matches!(
            self,
            Self::CsrfValidationFailed
                | Self::MissingAuthorizationCode
                | Self::ProviderDenied(_)
                | Self::TokenExchange(_)
                | Self::ProfileFetch(_)
        )
    }
}

/// Converts authentication errors into redirects.
///
/// - Login failures → `/autherror`
/// - `AccessDenied` → `/`
/// - `AdminRequired` → `/dashboard`
///
/// The error is logged at debug level; the browser only sees the redirect.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::CsrfValidationFailed
            | Self::MissingAuthorizationCode
            | Self::ProviderDenied(_)
            | Self::TokenExchange(_)
            | Self::ProfileFetch(_) => Redirect::to("/autherror").into_response(),
            Self::AccessDenied(_, _) => Redirect::to("/").into_response(),
            Self::AdminRequired(_) => Redirect::to("/dashboard").into_response(),
        }
    }
}
