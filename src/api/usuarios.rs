//! User management endpoints.

use serde_json::to_value;

use crate::api::parse_json;
use crate::error::UiError;
use crate::http::ApiClient;
use crate::models::{Profile, UsuarioDto};

/// Path of the current-user profile endpoint.
pub const ME_PATH: &str = "/usuarios/me/";

/// Fetch the profile of the authenticated user.
pub async fn me(client: &ApiClient) -> Result<Profile, UiError> {
    let response = client.get(ME_PATH).await?;
    parse_json(response)
}

/// Fetch all users.
pub async fn list(client: &ApiClient) -> Result<Vec<Profile>, UiError> {
    let response = client.get("/usuarios/").await?;
    parse_json(response)
}

/// Fetch users filtered by role name.
pub async fn list_by_rol(client: &ApiClient, rol_nombre: &str) -> Result<Vec<Profile>, UiError> {
    let response = client
        .get(&format!("/usuarios/?rol_nombre={rol_nombre}"))
        .await?;
    parse_json(response)
}

/// Fetch a single user.
pub async fn get(client: &ApiClient, id: i64) -> Result<Profile, UiError> {
    let response = client.get(&format!("/usuarios/{id}/")).await?;
    parse_json(response)
}

/// Fetch a user's extended profile.
pub async fn profile(client: &ApiClient, id: i64) -> Result<Profile, UiError> {
    let response = client.get(&format!("/usuarios/{id}/perfil/")).await?;
    parse_json(response)
}

/// Create a user.
pub async fn create(client: &ApiClient, dto: &UsuarioDto) -> Result<Profile, UiError> {
    let body = to_value(dto).map_err(|e| UiError::from_message(e.to_string()))?;
    let response = client.post("/usuarios/", Some(body)).await?;
    parse_json(response)
}

/// Replace a user.
pub async fn update(client: &ApiClient, id: i64, dto: &UsuarioDto) -> Result<Profile, UiError> {
    let body = to_value(dto).map_err(|e| UiError::from_message(e.to_string()))?;
    let response = client.put(&format!("/usuarios/{id}/"), Some(body)).await?;
    parse_json(response)
}

/// Delete a user.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), UiError> {
    client.delete(&format!("/usuarios/{id}/")).await?;
    Ok(())
}
