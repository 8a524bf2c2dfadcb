use std::collections::HashMap;
use std::mem;

use http::Method;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};

use crate::auth::store::{TokenStore, ACCESS_KEY, REFRESH_KEY};
use crate::http::transport::HttpTransport;
use crate::ClientConfig;

/// Path of the token refresh endpoint.
pub const TOKEN_REFRESH_PATH: &str = "/token/refresh/";

/// What the refresh endpoint returns. The refresh token only appears when
/// the server rotates it; rotation is server-controlled and must not be
/// assumed.
#[derive(Debug, Deserialize)]
struct RefreshGrant {
    access: Option<String>,
    refresh: Option<String>,
}

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<Option<String>>>,
}

/// Single-flight coordinator for the token refresh exchange.
///
/// At most one refresh HTTP call is in flight at any time. Callers that
/// arrive while one is running enqueue and are settled together with the
/// in-flight outcome — a burst of concurrent 401s right as a token
/// expires must not race refresh-token rotation with multiple exchanges.
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    /// Create an idle coordinator.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RefreshState::default()),
        }
    }

    /// Obtain a fresh access token, joining an in-flight exchange when one
    /// exists. Returns `None` when no refresh token is stored or the
    /// exchange fails; the caller decides what that means for the session.
    pub async fn refresh(
        &self,
        transport: &dyn HttpTransport,
        config: &ClientConfig,
        tokens: &TokenStore,
    ) -> Option<String> {
        // Either become the leader or enqueue behind the current one.
        let waiter = {
            let mut state = self.state.lock().await;
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = waiter {
            debug!("joining in-flight token refresh");
            return rx.await.unwrap_or(None);
        }

        let outcome = Self::exchange(transport, config, tokens).await;

        // Settle exactly once: clear the flag and drain the queue under
        // the same lock, then notify outside it.
        let waiters = {
            let mut state = self.state.lock().await;
            state.in_flight = false;
            mem::take(&mut state.waiters)
        };
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }

        outcome
    }

    /// The actual refresh exchange. Goes through the raw transport,
    /// bypassing the client's interceptor pipeline, so a rejected refresh
    /// can never recurse into another refresh.
    async fn exchange(
        transport: &dyn HttpTransport,
        config: &ClientConfig,
        tokens: &TokenStore,
    ) -> Option<String> {
        let refresh = match tokens.get(REFRESH_KEY) {
            Some(token) => token,
            None => {
                debug!("no refresh token stored, skipping exchange");
                return None;
            }
        };

        let url = config.api_url(TOKEN_REFRESH_PATH);
        let response = match transport
            .send(
                Method::POST,
                &url,
                HashMap::new(),
                Some(json!({ "refresh": refresh })),
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "token refresh transport failure");
                return None;
            }
        };

        if !response.is_success() {
            warn!(status = response.status(), "token refresh rejected");
            return None;
        }

        let grant: RefreshGrant = match response.json() {
            Ok(grant) => grant,
            Err(e) => {
                warn!(error = %e, "token refresh response undecodable");
                return None;
            }
        };

        let access = grant.access?;
        tokens.set(ACCESS_KEY, &access);
        if let Some(rotated) = grant.refresh {
            tokens.set(REFRESH_KEY, &rotated);
        }
        debug!("access token refreshed");
        Some(access)
    }
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
