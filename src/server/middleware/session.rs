//! Type-safe session state.
//!
//! All dashboard session data lives in one `DashboardSession` value stored under a single
//! session key. Handlers change it only through its named transitions and persist it with
//! `AuthSession::save`, so no handler touches raw session keys.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::{error::AppError, model::user::AuthUser};

const SESSION_DASHBOARD_KEY: &str = "dashboard";

/// Where a completed login lands when no page was requested before it.
const DEFAULT_LOGIN_REDIRECT: &str = "/dashboard";

/// Session state of one browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSession {
    /// Authenticated identity, set once the OAuth flow completes.
    pub user: Option<AuthUser>,
    /// Global admin flag, decided at login completion.
    pub is_admin: bool,
    /// Page to return to after login.
    pub back_url: Option<String>,
    /// OAuth state of a login in progress.
    pub csrf_token: Option<String>,
}

impl DashboardSession {
    /// Records the page an unauthenticated request asked for.
    pub fn remember_back_url(&mut self, url: impl Into<String>) {
        self.back_url = Some(url.into());
    }

    /// Stores the CSRF state of a new login attempt, replacing any earlier one.
    pub fn begin_login(&mut self, csrf_token: impl Into<String>) {
        self.csrf_token = Some(csrf_token.into());
    }

    /// Removes the pending CSRF state and checks it against the state Discord returned.
    ///
    /// A state can be checked once; a second callback with the same state fails.
    pub fn take_csrf_match(&mut self, state: &str) -> bool {
        self.csrf_token
            .take()
            .is_some_and(|expected| !expected.is_empty() && expected == state)
    }

    /// Signs `user` in and returns where to redirect, consuming `back_url`.
    pub fn complete_login(&mut self, user: AuthUser, is_admin: bool) -> String {
        self.user = Some(user);
        self.is_admin = is_admin;
        self.csrf_token = None;
        self.back_url
            .take()
            .unwrap_or_else(|| DEFAULT_LOGIN_REDIRECT.to_string())
    }

    /// Forgets everything, including a pending login.
    pub fn logout(&mut self) {
        *self = Self::default();
    }
}

/// Loads and stores `DashboardSession` in a tower-sessions `Session`.
pub struct AuthSession<'a> {
    /// The underlying tower-sessions Session instance.
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Reads the session state, or the empty state for a new session.
    ///
    /// # Returns
    /// - `Ok(DashboardSession)` - Stored or default state
    /// - `Err(AppError::SessionErr(_))` - Failed to access the session store
    pub async fn load(&self) -> Result<DashboardSession, AppError> {
        let state = self
            .session
            .get::<DashboardSession>(SESSION_DASHBOARD_KEY)
            .await?
            .unwrap_or_default();
        Ok(state)
    }

    /// Persists the session state.
    pub async fn save(&self, state: &DashboardSession) -> Result<(), AppError> {
        self.session.insert(SESSION_DASHBOARD_KEY, state).await?;
        Ok(())
    }

    /// Destroys the session, removing it from the store and expiring the cookie.
    pub async fn destroy(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}
