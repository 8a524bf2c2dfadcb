//! Product catalog endpoints.

use serde_json::to_value;

use crate::api::parse_json;
use crate::error::UiError;
use crate::http::ApiClient;
use crate::models::{Producto, ProductoDto};

/// Fetch the whole catalog.
pub async fn list(client: &ApiClient) -> Result<Vec<Producto>, UiError> {
    let response = client.get("/productos/").await?;
    parse_json(response)
}

/// Fetch a single product.
pub async fn get(client: &ApiClient, id: i64) -> Result<Producto, UiError> {
    let response = client.get(&format!("/productos/{id}/")).await?;
    parse_json(response)
}

/// Create a product.
pub async fn create(client: &ApiClient, dto: &ProductoDto) -> Result<Producto, UiError> {
    let body = to_value(dto).map_err(|e| UiError::from_message(e.to_string()))?;
    let response = client.post("/productos/", Some(body)).await?;
    parse_json(response)
}

/// Replace a product.
pub async fn update(client: &ApiClient, id: i64, dto: &ProductoDto) -> Result<Producto, UiError> {
    let body = to_value(dto).map_err(|e| UiError::from_message(e.to_string()))?;
    let response = client.put(&format!("/productos/{id}/"), Some(body)).await?;
    parse_json(response)
}

/// Delete a product.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), UiError> {
    client.delete(&format!("/productos/{id}/")).await?;
    Ok(())
}
