//! Audit-log ("bitácora") endpoints.

use serde_json::{to_value, Value};

use crate::api::parse_json;
use crate::error::UiError;
use crate::http::ApiClient;
use crate::models::{Bitacora, BitacoraDto};

/// Fetch all audit-log entries.
pub async fn list(client: &ApiClient) -> Result<Vec<Bitacora>, UiError> {
    let response = client.get("/bitacoras/").await?;
    parse_json(response)
}

/// Fetch a single audit-log entry.
pub async fn get(client: &ApiClient, id: i64) -> Result<Bitacora, UiError> {
    let response = client.get(&format!("/bitacoras/{id}/")).await?;
    parse_json(response)
}

/// Create an audit-log entry.
pub async fn create(client: &ApiClient, dto: &BitacoraDto) -> Result<Bitacora, UiError> {
    let body = to_value(dto).map_err(|e| UiError::from_message(e.to_string()))?;
    let response = client.post("/bitacoras/", Some(body)).await?;
    parse_json(response)
}

/// Replace an audit-log entry.
pub async fn update(client: &ApiClient, id: i64, dto: &BitacoraDto) -> Result<Bitacora, UiError> {
    let body = to_value(dto).map_err(|e| UiError::from_message(e.to_string()))?;
    let response = client.put(&format!("/bitacoras/{id}/"), Some(body)).await?;
    parse_json(response)
}

/// Patch selected fields of an audit-log entry, e.g. stamping `logout`.
pub async fn partial_update(client: &ApiClient, id: i64, patch: Value) -> Result<Bitacora, UiError> {
    let response = client
        .patch(&format!("/bitacoras/{id}/"), Some(patch))
        .await?;
    parse_json(response)
}

/// Delete an audit-log entry.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), UiError> {
    client.delete(&format!("/bitacoras/{id}/")).await?;
    Ok(())
}
