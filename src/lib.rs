//! Client session layer for the SmartSales365 backend.
//!
//! The backend owns all business logic; this crate owns the authenticated
//! conversation with it: durable token storage, bearer-token attachment,
//! a deduplicated refresh-and-retry cycle on expiry, error normalization,
//! the session state machine, and the route-guard decisions the UI layer
//! consumes.

use serde::{Deserialize, Serialize};

// Export modules
pub mod api;
pub mod auth;
pub mod error;
pub mod guards;
pub mod http;
pub mod logging;
pub mod models;
pub mod navigator;
pub mod notices;

pub use auth::{SessionManager, SessionSnapshot, SessionState, TokenStore};
pub use error::UiError;
pub use guards::GuardOutcome;
pub use http::ApiClient;
pub use navigator::{NavigateOptions, Navigator};
pub use notices::{Notice, NoticeSink};

/// Default backend base URL for local development.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "SMARTSALES_API_URL";

/// Path fragments that mark a request as an authentication endpoint.
///
/// Matching is a deliberate raw substring/suffix check on the request
/// path: it is what keeps the refresh-retry cycle from firing on the
/// login form's own 401 or on a failed refresh call. It is also brittle —
/// an unrelated endpoint containing "login" would be misclassified — and
/// is kept loose on purpose; tightening it would change observable
/// behavior. Adjust the fragments if the backend routes ever move.
const AUTH_URL_FRAGMENTS: [&str; 3] = ["/api/token", "/token/refresh", "/login"];
const AUTH_URL_SUFFIX: &str = "/token/";

/// Configuration for the API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL all request paths are joined onto.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a config from the environment, loading a `.env` file when
    /// present and falling back to [`DEFAULT_API_URL`].
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let base_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self { base_url }
    }

    /// Join a request path onto the base URL.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Whether `path` targets an authentication endpoint (login, token
    /// issuance or token refresh).
    pub fn is_auth_url(&self, path: &str) -> bool {
        let path = path.to_lowercase();
        path.ends_with(AUTH_URL_SUFFIX)
            || AUTH_URL_FRAGMENTS
                .iter()
                .any(|fragment| path.contains(fragment))
    }
}

#[cfg(test)]
mod tests;
