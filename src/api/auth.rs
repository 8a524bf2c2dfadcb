//! Authentication endpoints: credential exchange and server-side logout.

use serde_json::json;

use crate::api::parse_json;
use crate::error::UiError;
use crate::http::ApiClient;
use crate::models::TokenPair;

/// Path of the credential exchange endpoint.
pub const LOGIN_PATH: &str = "/login/";
/// Path of the server-side logout endpoint.
pub const LOGOUT_PATH: &str = "/logout/";

/// Exchange credentials for a token pair.
///
/// A 401 here is a wrong-credentials answer and is surfaced untouched —
/// the client pipeline never attempts a refresh for auth endpoints.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<TokenPair, UiError> {
    let response = client
        .post(
            LOGIN_PATH,
            Some(json!({ "username": username, "password": password })),
        )
        .await?;
    parse_json(response)
}

/// Tell the server to invalidate `refresh`.
pub async fn logout(client: &ApiClient, refresh: &str) -> Result<(), UiError> {
    client
        .post(LOGOUT_PATH, Some(json!({ "refresh": refresh })))
        .await?;
    Ok(())
}
