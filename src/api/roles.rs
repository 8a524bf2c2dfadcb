//! Role management endpoints.

use serde_json::{to_value, Value};

use crate::api::parse_json;
use crate::error::UiError;
use crate::http::ApiClient;
use crate::models::{Rol, RolDto};

/// Fetch all roles.
pub async fn list(client: &ApiClient) -> Result<Vec<Rol>, UiError> {
    let response = client.get("/roles/").await?;
    parse_json(response)
}

/// Fetch a single role.
pub async fn get(client: &ApiClient, id: i64) -> Result<Rol, UiError> {
    let response = client.get(&format!("/roles/{id}/")).await?;
    parse_json(response)
}

/// Create a role.
pub async fn create(client: &ApiClient, dto: &RolDto) -> Result<Rol, UiError> {
    let body = to_value(dto).map_err(|e| UiError::from_message(e.to_string()))?;
    let response = client.post("/roles/", Some(body)).await?;
    parse_json(response)
}

/// Replace a role.
pub async fn update(client: &ApiClient, id: i64, dto: &RolDto) -> Result<Rol, UiError> {
    let body = to_value(dto).map_err(|e| UiError::from_message(e.to_string()))?;
    let response = client.put(&format!("/roles/{id}/"), Some(body)).await?;
    parse_json(response)
}

/// Patch selected fields of a role.
pub async fn partial_update(client: &ApiClient, id: i64, patch: Value) -> Result<Rol, UiError> {
    let response = client.patch(&format!("/roles/{id}/"), Some(patch)).await?;
    parse_json(response)
}

/// Delete a role.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), UiError> {
    client.delete(&format!("/roles/{id}/")).await?;
    Ok(())
}
