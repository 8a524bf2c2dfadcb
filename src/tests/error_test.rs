//! Tests for the error normalizer's fallback chain.

use serde_json::json;

use crate::error::{classify, BackendErrorBody, RequestFailure, UiError};

fn response(status: u16, body: serde_json::Value) -> RequestFailure {
    RequestFailure::Response { status, body }
}

#[test]
fn structured_error_envelope_is_preferred() {
    let failure = response(
        400,
        json!({
            "error": {
                "message": "Stock insuficiente",
                "fields": { "stock": ["Debe ser mayor a cero"] }
            }
        }),
    );

    let ui = UiError::from_failure(&failure);
    assert_eq!(ui.message, "Stock insuficiente");
    assert_eq!(ui.status, Some(400));
    assert_eq!(
        ui.fields.unwrap().get("stock"),
        Some(&vec!["Debe ser mayor a cero".to_string()])
    );
}

#[test]
fn structured_envelope_without_message_gets_the_generic_text() {
    let failure = response(400, json!({ "error": { "fields": { "precio": ["inválido"] } } }));

    let ui = UiError::from_failure(&failure);
    assert_eq!(ui.message, "Ocurrió un error inesperado");
    assert!(ui.fields.is_some());
}

#[test]
fn structured_envelope_wins_over_detail() {
    let failure = response(
        400,
        json!({
            "error": { "message": "desde el envelope" },
            "detail": "desde detail"
        }),
    );

    let ui = UiError::from_failure(&failure);
    assert_eq!(ui.message, "desde el envelope");
}

#[test]
fn detail_is_the_second_choice() {
    let failure = response(401, json!({ "detail": "invalid credentials" }));

    let ui = UiError::from_failure(&failure);
    assert_eq!(ui.message, "invalid credentials");
    assert_eq!(ui.fields, None);
    assert_eq!(ui.status, Some(401));
}

#[test]
fn bare_body_is_treated_as_a_validation_map() {
    let failure = response(
        400,
        json!({
            "nombre": ["Este campo es requerido."],
            "precio": "Debe ser un número."
        }),
    );

    let ui = UiError::from_failure(&failure);
    assert_eq!(ui.message, "Error de validación, por favor revise los campos.");
    let fields = ui.fields.unwrap();
    assert_eq!(
        fields.get("nombre"),
        Some(&vec!["Este campo es requerido.".to_string()])
    );
    // single strings are wrapped into one-message lists
    assert_eq!(
        fields.get("precio"),
        Some(&vec!["Debe ser un número.".to_string()])
    );
}

#[test]
fn non_object_body_yields_no_fields() {
    let failure = response(502, json!("<html>bad gateway</html>"));

    let ui = UiError::from_failure(&failure);
    assert_eq!(ui.message, "Error de validación, por favor revise los campos.");
    assert_eq!(ui.fields, None);
    assert_eq!(ui.status, Some(502));
}

#[test]
fn connectivity_failure_maps_to_the_offline_text() {
    let failure = RequestFailure::Transport {
        message: "connection refused".to_string(),
        request_sent: true,
    };

    assert_eq!(classify(&failure), BackendErrorBody::Network);
    let ui = UiError::from_failure(&failure);
    assert_eq!(ui.message, "No hay conexión con el servidor");
    assert_eq!(ui.status, None);
}

#[test]
fn unsent_request_surfaces_its_own_message() {
    let failure = RequestFailure::Transport {
        message: "invalid header value".to_string(),
        request_sent: false,
    };

    let ui = UiError::from_failure(&failure);
    assert_eq!(ui.message, "invalid header value");
    assert_eq!(ui.status, None);
}

#[test]
fn classification_order_matches_the_contract() {
    // 1. envelope
    assert!(matches!(
        classify(&response(400, json!({ "error": { "message": "m" } }))),
        BackendErrorBody::Structured { .. }
    ));
    // 2. detail
    assert!(matches!(
        classify(&response(400, json!({ "detail": "d" }))),
        BackendErrorBody::Detail { .. }
    ));
    // 3. raw body
    assert!(matches!(
        classify(&response(400, json!({ "campo": ["x"] }))),
        BackendErrorBody::Raw { .. }
    ));
}
