use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Raw failure produced by the HTTP layer before normalization.
///
/// Either the server answered with a non-success status (the body is kept
/// verbatim for inspection), or the request never produced a response.
#[derive(Debug, Clone, Error)]
pub enum RequestFailure {
    /// The server responded with a non-2xx status.
    #[error("HTTP {status}")]
    Response {
        /// HTTP status code
        status: u16,
        /// Response body, parsed as JSON when possible
        body: Value,
    },

    /// The request failed below the HTTP layer.
    #[error("transport error: {message}")]
    Transport {
        /// Transport-level description of the failure
        message: String,
        /// Whether the request was actually sent over the wire.
        /// `true` means connectivity loss; `false` means the request
        /// could not even be built.
        request_sent: bool,
    },
}

/// The known shapes a backend failure can take, in classification order.
///
/// The backend is not consistent about its error envelope, so
/// classification walks a fallback chain: prefer the most structured
/// shape present, degrade to generic text at the end.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendErrorBody {
    /// `{ "error": { "message": ..., "fields": ... } }`
    Structured {
        message: String,
        fields: Option<HashMap<String, Vec<String>>>,
    },
    /// `{ "detail": "..." }`
    Detail { message: String },
    /// Anything else with a response body; assumed to be a field-keyed
    /// validation map.
    Raw { body: Value },
    /// Request sent, no response received.
    Network,
    /// Request never left the client.
    Unknown { message: Option<String> },
}

/// Normalized error shape handed to the UI layer.
///
/// Ephemeral: built per failed call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiError {
    /// User-facing message
    pub message: String,
    /// Per-field validation errors, when the backend returned them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, Vec<String>>>,
    /// HTTP status code, when a response was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

const MSG_UNEXPECTED: &str = "Ocurrió un error inesperado";
const MSG_VALIDATION: &str = "Error de validación, por favor revise los campos.";
const MSG_NO_CONNECTION: &str = "No hay conexión con el servidor";
const MSG_UNKNOWN: &str = "Error desconocido";

impl UiError {
    /// Normalize a raw request failure into the UI error shape.
    pub fn from_failure(failure: &RequestFailure) -> Self {
        let status = match failure {
            RequestFailure::Response { status, .. } => Some(*status),
            RequestFailure::Transport { .. } => None,
        };

        match classify(failure) {
            BackendErrorBody::Structured { message, fields } => Self {
                message,
                fields,
                status,
            },
            BackendErrorBody::Detail { message } => Self {
                message,
                fields: None,
                status,
            },
            BackendErrorBody::Raw { body } => Self {
                message: MSG_VALIDATION.to_string(),
                fields: fields_from_value(&body),
                status,
            },
            BackendErrorBody::Network => Self {
                message: MSG_NO_CONNECTION.to_string(),
                fields: None,
                status: None,
            },
            BackendErrorBody::Unknown { message } => Self {
                message: message.unwrap_or_else(|| MSG_UNKNOWN.to_string()),
                fields: None,
                status: None,
            },
        }
    }

    /// Build an error that carries only a message, for client-side
    /// failures such as undecodable response bodies.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: None,
            status: None,
        }
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for UiError {}

/// Classify a raw failure into one of the known backend error shapes.
///
/// Order matters and is part of the contract:
/// 1. response with an `error` object,
/// 2. response with a `detail` string,
/// 3. any other response body (treated as a validation map),
/// 4. request sent but no response,
/// 5. everything else.
pub fn classify(failure: &RequestFailure) -> BackendErrorBody {
    match failure {
        RequestFailure::Response { body, .. } => {
            if let Some(error) = body.get("error") {
                let message = error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or(MSG_UNEXPECTED)
                    .to_string();
                let fields = error.get("fields").and_then(fields_from_value);
                return BackendErrorBody::Structured { message, fields };
            }
            if let Some(detail) = body.get("detail").and_then(Value::as_str) {
                return BackendErrorBody::Detail {
                    message: detail.to_string(),
                };
            }
            BackendErrorBody::Raw { body: body.clone() }
        }
        RequestFailure::Transport {
            message,
            request_sent,
        } => {
            if *request_sent {
                BackendErrorBody::Network
            } else {
                BackendErrorBody::Unknown {
                    message: Some(message.clone()),
                }
            }
        }
    }
}

/// Best-effort extraction of a `field -> messages` map from an arbitrary
/// JSON value. Validation errors usually arrive as `{field: [msg, ...]}`,
/// but single strings show up too; anything that is not an object yields
/// `None`.
fn fields_from_value(value: &Value) -> Option<HashMap<String, Vec<String>>> {
    let object = value.as_object()?;
    if object.is_empty() {
        return None;
    }

    let mut fields = HashMap::with_capacity(object.len());
    for (key, entry) in object {
        let messages = match entry {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            other => vec![other.to_string()],
        };
        fields.insert(key.clone(), messages);
    }
    Some(fields)
}
