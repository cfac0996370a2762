//! Session lifecycle: restore on startup, login, signup, logout.
//!
//! These functions own the persistence rules; `state::AppState` wires them to
//! signals so the shell re-renders on every transition.

use crate::api::{ApiError, SentimentApi, SIGNUP_FAILED};
use crate::models::{Identity, Role, Session, SessionState};
use crate::storage::{clear_session, load_session, save_session, SessionStorage};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Registration(String),
}

/// Reads the persisted session. Half-written or invalid entries are wiped.
pub(crate) fn restore<S: SessionStorage + ?Sized>(storage: &S) -> SessionState {
    match load_session(storage) {
        Some(session) => {
            log::info!("restored session for {}", session.identity().username);
            SessionState::Authenticated(session)
        }
        None => {
            clear_session(storage);
            SessionState::Anonymous
        }
    }
}

pub(crate) async fn login<A, S>(
    api: &A,
    storage: &S,
    username: &str,
    password: &str,
) -> Result<Session, AuthError>
where
    A: SentimentApi + ?Sized,
    S: SessionStorage + ?Sized,
{
    let response = api.login(username, password).await.map_err(|e| {
        log::warn!("login failed for {username}: {e}");
        AuthError::InvalidCredentials
    })?;

    // The login endpoint returns only a token; identity is built from what was typed.
    let identity = Identity {
        username: username.to_string(),
        role: role_hint_from_token(&response.access),
    };
    let session = Session::new(identity, response.access).ok_or(AuthError::InvalidCredentials)?;

    save_session(storage, &session);
    log::info!("signed in as {username}");
    Ok(session)
}

/// Registers, then signs in with the same credentials. No auto-login on rejection.
pub(crate) async fn signup<A, S>(
    api: &A,
    storage: &S,
    username: &str,
    password: &str,
    email: &str,
) -> Result<Session, AuthError>
where
    A: SentimentApi + ?Sized,
    S: SessionStorage + ?Sized,
{
    api.signup(username, password, email)
        .await
        .map_err(|e| match e {
            ApiError::Rejected(message) => AuthError::Registration(message),
            ApiError::Network(_) => AuthError::Registration(e.to_string()),
            _ => AuthError::Registration(SIGNUP_FAILED.to_string()),
        })?;

    log::info!("registered {username}");
    login(api, storage, username, password).await
}

pub(crate) fn logout<S: SessionStorage + ?Sized>(storage: &S) -> SessionState {
    clear_session(storage);
    log::info!("signed out");
    SessionState::Anonymous
}

/// Display-only role hint read from an unverified JWT payload.
///
/// Recognizes `role: "admin"` and `is_staff`/`is_superuser: true`. Anything
/// else, including opaque tokens, is a plain user.
pub(crate) fn role_hint_from_token(token: &str) -> Role {
    let mut parts = token.split('.');
    let (Some(_), Some(payload), Some(_)) = (parts.next(), parts.next(), parts.next()) else {
        return Role::User;
    };

    let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) else {
        return Role::User;
    };
    let Ok(claims) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
        return Role::User;
    };

    let flag = |k: &str| claims.get(k).and_then(|v| v.as_bool()).unwrap_or(false);
    let role = claims
        .get("role")
        .and_then(|v| v.as_str())
        .and_then(|s| Role::from_str(s).ok());

    if role == Some(Role::Admin) || flag("is_staff") || flag("is_superuser") {
        Role::Admin
    } else {
        Role::User
    }
}
