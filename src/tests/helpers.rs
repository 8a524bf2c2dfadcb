//! Shared fixtures for the behavior tests.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::auth::store::TokenStore;
use crate::http::transport::mock::MockTransport;
use crate::http::{ApiClient, HttpTransport};
use crate::navigator::Navigator;
use crate::notices::{Notice, NoticeSink};
use crate::ClientConfig;

/// Base URL used by all mock-transport tests.
pub const BASE: &str = "http://testserver/api";

/// Absolute URL for a request path, as the transport sees it.
pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

/// A fully wired client over the mock transport, with captured
/// navigations and notices.
pub struct Harness {
    pub client: Arc<ApiClient>,
    pub transport: Arc<MockTransport>,
    pub tokens: Arc<TokenStore>,
    pub navigations: Arc<Mutex<Vec<(String, bool)>>>,
    pub notices: Arc<Mutex<Vec<Notice>>>,
}

impl Harness {
    pub fn new() -> Self {
        let config = ClientConfig {
            base_url: BASE.to_string(),
        };
        let tokens = Arc::new(TokenStore::in_memory());
        let transport = Arc::new(MockTransport::new());

        let navigator = Arc::new(Navigator::new());
        let navigations: Arc<Mutex<Vec<(String, bool)>>> = Arc::new(Mutex::new(Vec::new()));
        {
            let sink = Arc::clone(&navigations);
            navigator.install(move |path, opts| {
                sink.lock().unwrap().push((path.to_string(), opts.replace));
            });
        }

        let notice_sink = Arc::new(NoticeSink::new());
        let notices: Arc<Mutex<Vec<Notice>>> = Arc::new(Mutex::new(Vec::new()));
        {
            let sink = Arc::clone(&notices);
            notice_sink.install(move |notice| {
                sink.lock().unwrap().push(notice);
            });
        }

        let client = Arc::new(ApiClient::with_transport(
            config,
            Arc::clone(&transport) as Arc<dyn HttpTransport>,
            Arc::clone(&tokens),
            navigator,
            notice_sink,
        ));

        Self {
            client,
            transport,
            tokens,
            navigations,
            notices,
        }
    }

    pub fn navigations(&self) -> Vec<(String, bool)> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

/// A profile body the backend would return from `/usuarios/me/`.
pub fn profile_body(username: &str, rol: &str) -> Value {
    json!({
        "id": 1,
        "username": username,
        "nombre": "Ana",
        "apellido_paterno": "García",
        "apellido_materno": "López",
        "email": "ana@example.com",
        "direccion": null,
        "fecha_nacimiento": null,
        "rol": { "id": 1, "nombre": rol }
    })
}
