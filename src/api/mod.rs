//! Thin typed wrappers over the backend's resource endpoints.
//!
//! Every function takes the shared [`ApiClient`](crate::http::ApiClient)
//! and returns decoded models; all auth, refresh and redirect behavior
//! lives in the client itself.

pub mod auth;
pub mod bitacora;
pub mod productos;
pub mod roles;
pub mod usuarios;

use serde::de::DeserializeOwned;

use crate::error::UiError;
use crate::http::transport::RawResponse;

/// Decode a successful response body, surfacing decode failures as a
/// plain-message error.
pub(crate) fn parse_json<T: DeserializeOwned>(response: RawResponse) -> Result<T, UiError> {
    response
        .json()
        .map_err(|e| UiError::from_message(format!("Respuesta inválida del servidor: {e}")))
}
