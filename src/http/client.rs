use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use http::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::refresh::RefreshCoordinator;
use crate::auth::store::{TokenStore, ACCESS_KEY, REFRESH_KEY};
use crate::error::{RequestFailure, UiError};
use crate::http::transport::{HttpTransport, RawResponse, ReqwestTransport};
use crate::navigator::{NavigateOptions, Navigator};
use crate::notices::{Notice, NoticeSink};
use crate::ClientConfig;

/// Authenticated HTTP client for the SmartSales backend.
///
/// Every request runs through the same pipeline: attach the bearer token
/// on the way out, classify failures on the way in, and — for a 401 on a
/// protected endpoint — perform one deduplicated refresh-and-retry before
/// giving up. Navigation and notices go through the injected indirections
/// so the client works outside any UI tree.
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<TokenStore>,
    refresher: RefreshCoordinator,
    navigator: Arc<Navigator>,
    notices: Arc<NoticeSink>,
    /// Fallback `Authorization` value used when no access token is in the
    /// store; managed by the session layer.
    default_auth: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client over the real reqwest transport.
    pub fn new(
        config: ClientConfig,
        tokens: Arc<TokenStore>,
        navigator: Arc<Navigator>,
        notices: Arc<NoticeSink>,
    ) -> Self {
        Self::with_transport(
            config,
            Arc::new(ReqwestTransport::new()),
            tokens,
            navigator,
            notices,
        )
    }

    /// Create a client over a custom transport; tests substitute a mock
    /// here.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<TokenStore>,
        navigator: Arc<Navigator>,
        notices: Arc<NoticeSink>,
    ) -> Self {
        Self {
            config,
            transport,
            tokens,
            refresher: RefreshCoordinator::new(),
            navigator,
            notices,
            default_auth: RwLock::new(None),
        }
    }

    /// The token store this client reads its credentials from.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Set the default `Authorization` bearer value.
    pub fn set_default_auth(&self, token: &str) {
        let mut guard = self
            .default_auth
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(format!("Bearer {token}"));
    }

    /// Remove the default `Authorization` value.
    pub fn clear_default_auth(&self) {
        let mut guard = self
            .default_auth
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// `GET` a path relative to the base URL.
    pub async fn get(&self, path: &str) -> Result<RawResponse, UiError> {
        self.request(Method::GET, path, None).await
    }

    /// `POST` a JSON body to a path relative to the base URL.
    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<RawResponse, UiError> {
        self.request(Method::POST, path, body).await
    }

    /// `PUT` a JSON body to a path relative to the base URL.
    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<RawResponse, UiError> {
        self.request(Method::PUT, path, body).await
    }

    /// `PATCH` a JSON body to a path relative to the base URL.
    pub async fn patch(&self, path: &str, body: Option<Value>) -> Result<RawResponse, UiError> {
        self.request(Method::PATCH, path, body).await
    }

    /// `DELETE` a path relative to the base URL.
    pub async fn delete(&self, path: &str) -> Result<RawResponse, UiError> {
        self.request(Method::DELETE, path, None).await
    }

    /// Run one request through the full pipeline.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<RawResponse, UiError> {
        let url = self.config.api_url(path);
        // Per-request retry flag: at most one refresh-and-retry per
        // originating request, no matter what the retry comes back with.
        let mut retried = false;
        let mut override_token: Option<String> = None;

        loop {
            let headers = self.auth_headers(override_token.as_deref());
            let failure = match self
                .transport
                .send(method.clone(), &url, headers, body.clone())
                .await
            {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => RequestFailure::Response {
                    status: response.status(),
                    body: response.json_value(),
                },
                Err(failure) => failure,
            };

            let ui = UiError::from_failure(&failure);

            if ui.status == Some(401) {
                // 401 while explicitly authenticating (login or refresh):
                // the form owns the failure. No refresh, no redirect.
                if self.config.is_auth_url(path) {
                    return Err(ui);
                }

                if !retried {
                    retried = true;
                    // Whether the user believed they were signed in, read
                    // before the refresh can mutate the store.
                    let had_token = self.tokens.get(ACCESS_KEY).is_some();

                    if let Some(access) = self
                        .refresher
                        .refresh(self.transport.as_ref(), &self.config, &self.tokens)
                        .await
                    {
                        debug!(%method, path, "retrying request with refreshed token");
                        override_token = Some(access);
                        continue;
                    }

                    if had_token {
                        info!(path, "session unrecoverable, signing out");
                        self.tokens.clear(ACCESS_KEY);
                        self.tokens.clear(REFRESH_KEY);
                        self.notices.emit(Notice::SessionExpired);
                        self.navigator
                            .navigate_to("/login", NavigateOptions::replace());
                    }
                    return Err(ui);
                }

                // Second 401 on the same request: give up and surface it.
                warn!(%method, path, "request still unauthorized after refresh");
                return Err(ui);
            }

            match ui.status {
                Some(403) => {
                    self.navigator
                        .navigate_to("/forbidden", NavigateOptions::replace());
                }
                Some(404) => {
                    self.navigator
                        .navigate_to("/not-found", NavigateOptions::replace());
                }
                Some(status) if status >= 500 => {
                    self.notices.emit(Notice::ServerFault);
                }
                _ => {}
            }
            return Err(ui);
        }
    }

    /// Outbound header set for one attempt: an explicit override token
    /// (the retry path), else the stored access token, else the default
    /// header, else nothing — the request proceeds unauthenticated and
    /// the server decides.
    fn auth_headers(&self, override_token: Option<&str>) -> HashMap<String, String> {
        let mut headers = HashMap::new();

        let bearer = override_token
            .map(|token| format!("Bearer {token}"))
            .or_else(|| {
                self.tokens
                    .get(ACCESS_KEY)
                    .map(|token| format!("Bearer {token}"))
            })
            .or_else(|| {
                self.default_auth
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone()
            });

        if let Some(value) = bearer {
            headers.insert("Authorization".to_string(), value);
        }
        headers
    }
}
