use crate::api::ApiClient;
use crate::models::{Identity, SessionState};
use crate::session::{self, AuthError};
use crate::storage::BrowserStorage;
use leptos::prelude::*;

/// Process-lifetime session store, provided once by the shell.
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub session: RwSignal<SessionState>,
    pub api_client: StoredValue<ApiClient>,
}

impl AppState {
    /// Starts in `Loading`; call `restore` to read persisted state.
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(SessionState::Loading),
            api_client: StoredValue::new(ApiClient::from_env()),
        }
    }

    pub fn restore(&self) {
        self.session.set(session::restore(&BrowserStorage));
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let api = self.api_client.get_value();
        let s = session::login(&api, &BrowserStorage, username, password).await?;
        self.session.set(SessionState::Authenticated(s));
        Ok(())
    }

    pub async fn signup(&self, username: &str, password: &str, email: &str) -> Result<(), AuthError> {
        let api = self.api_client.get_value();
        let s = session::signup(&api, &BrowserStorage, username, password, email).await?;
        self.session.set(SessionState::Authenticated(s));
        Ok(())
    }

    pub fn logout(&self) {
        self.session.set(session::logout(&BrowserStorage));
    }

    /// Tracked: re-runs the caller when the session changes.
    pub fn identity(&self) -> Option<Identity> {
        self.session
            .with(|s| s.session().map(|s| s.identity().clone()))
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.session().map(|s| s.token().to_string()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
