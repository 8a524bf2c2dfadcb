use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api;
use crate::auth::store::{ACCESS_KEY, REFRESH_KEY};
use crate::error::UiError;
use crate::http::ApiClient;
use crate::models::Profile;

/// The authenticated-user state machine.
///
/// `Bootstrapping -> {Authenticated, Anonymous}` on startup, then
/// `Anonymous -> Authenticated` on sign-in and
/// `Authenticated -> Anonymous` on sign-out or an unrecoverable 401.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Startup: a stored token may still be validated against the server.
    Bootstrapping,
    /// A user is signed in.
    Authenticated(Profile),
    /// Nobody is signed in.
    Anonymous,
}

/// What the route guards consume: the current user, if any, and whether
/// the session is still being established.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<Profile>,
    pub loading: bool,
}

/// Process-wide session holder over the shared [`ApiClient`].
///
/// The profile itself is never persisted — only the tokens are. On every
/// startup the profile is reconstructed from the server if a stored
/// access token exists.
pub struct SessionManager {
    client: Arc<ApiClient>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Create a manager in the `Bootstrapping` state.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: RwLock::new(SessionState::Bootstrapping),
        }
    }

    /// The client this session rides on.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Resolve the initial state from storage.
    ///
    /// No stored access token means straight to `Anonymous`. Otherwise the
    /// token is installed as the default header and validated by fetching
    /// the profile; a rejected token is removed and the session becomes
    /// `Anonymous`.
    pub async fn bootstrap(&self) {
        let token = match self.client.tokens().get(ACCESS_KEY) {
            Some(token) => token,
            None => {
                debug!("no stored access token, starting anonymous");
                *self.state.write().await = SessionState::Anonymous;
                return;
            }
        };

        self.client.set_default_auth(&token);
        match api::usuarios::me(&self.client).await {
            Ok(profile) => {
                info!(user = %profile.username, "session restored from stored token");
                *self.state.write().await = SessionState::Authenticated(profile);
            }
            Err(e) => {
                debug!(error = %e, "stored token rejected, starting anonymous");
                self.client.tokens().clear(ACCESS_KEY);
                *self.state.write().await = SessionState::Anonymous;
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// Persists the issued token pair, installs the default header,
    /// fetches the profile and returns it so the caller can route by role
    /// immediately.
    pub async fn signin(&self, username: &str, password: &str) -> Result<Profile, UiError> {
        let pair = api::auth::login(&self.client, username, password).await?;

        self.client.set_default_auth(&pair.access);
        self.client.tokens().set(ACCESS_KEY, &pair.access);
        self.client.tokens().set(REFRESH_KEY, &pair.refresh);

        let profile = api::usuarios::me(&self.client).await?;
        info!(user = %profile.username, "signed in");
        *self.state.write().await = SessionState::Authenticated(profile.clone());
        Ok(profile)
    }

    /// End the session.
    ///
    /// The server is notified best-effort — local logout must succeed even
    /// when the network call does not. Tokens and the default header are
    /// always cleared.
    pub async fn signout(&self) {
        if let Some(refresh) = self.client.tokens().get(REFRESH_KEY) {
            if let Err(e) = api::auth::logout(&self.client, &refresh).await {
                warn!(error = %e, "server logout notification failed");
            }
        }

        self.client.tokens().clear(ACCESS_KEY);
        self.client.tokens().clear(REFRESH_KEY);
        self.client.clear_default_auth();
        *self.state.write().await = SessionState::Anonymous;
        info!("signed out");
    }

    /// Current state, cloned.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Snapshot for the route guards.
    pub async fn snapshot(&self) -> SessionSnapshot {
        match &*self.state.read().await {
            SessionState::Bootstrapping => SessionSnapshot {
                user: None,
                loading: true,
            },
            SessionState::Authenticated(profile) => SessionSnapshot {
                user: Some(profile.clone()),
                loading: false,
            },
            SessionState::Anonymous => SessionSnapshot {
                user: None,
                loading: false,
            },
        }
    }
}
