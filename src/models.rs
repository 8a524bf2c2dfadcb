//! Backend data model, mirroring the serializers exposed by the
//! SmartSales API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A role as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rol {
    pub id: i64,
    pub nombre: String,
}

/// The authenticated user's profile, fetched from `/usuarios/me/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub username: String,
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    pub email: Option<String>,
    pub direccion: Option<String>,
    pub fecha_nacimiento: Option<String>,
    pub rol: Rol,
    #[serde(default)]
    pub sexo: Option<String>,
    #[serde(default)]
    pub tipo_personal: Option<String>,
    #[serde(default)]
    pub fecha_ingreso: Option<String>,
    #[serde(default)]
    pub salario: Option<f64>,
    #[serde(default)]
    pub fecha_certificacion: Option<String>,
    #[serde(default)]
    pub empresa: Option<String>,
}

/// Token pair issued by `/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub stock: i64,
    pub descripcion: String,
    pub imagen: Option<String>,
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductoDto {
    pub nombre: String,
    pub precio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modelo: Option<String>,
    pub stock: i64,
    pub descripcion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
}

/// Payload for creating or replacing a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolDto {
    pub nombre: String,
}

/// An audit-log ("bitácora") entry. `usuario` comes back expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bitacora {
    pub id: i64,
    pub login: DateTime<Utc>,
    pub logout: Option<DateTime<Utc>>,
    pub usuario: Profile,
    pub ip: Option<String>,
    pub device: Option<String>,
}

/// Payload for creating or updating an audit-log entry; `usuario` is the
/// user's id here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitacoraDto {
    pub login: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logout: Option<DateTime<Utc>>,
    pub usuario: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

/// Payload for creating or updating a user. `password` is omitted on
/// updates that do not change it; `rol` is the role id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsuarioDto {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rol: Option<i64>,
}
