use std::collections::HashMap;

use async_trait::async_trait;
use http::Method;
use serde_json::Value;

use crate::error::RequestFailure;

/// Response data as seen by the interceptor pipeline.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    status: u16,
    /// Response body
    body: String,
}

impl RawResponse {
    /// Create a new response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Get the status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get a reference to the response body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse the body as JSON into a typed value
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Parse the body as a JSON value, falling back to a JSON string when
    /// the body is not JSON at all (HTML error pages, empty bodies).
    pub fn json_value(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }

    /// Check if successful (2xx status)
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Trait for the raw HTTP transport, allowing for mocking.
///
/// A transport only fails for transport-level reasons; HTTP error
/// statuses come back as ordinary [`RawResponse`] values and are
/// classified by the caller.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the raw response.
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: HashMap<String, String>,
        body: Option<Value>,
    ) -> Result<RawResponse, RequestFailure>;
}

/// Implementation of [`HttpTransport`] using reqwest.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default reqwest client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport with custom client configuration.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: HashMap<String, String>,
        body: Option<Value>,
    ) -> Result<RawResponse, RequestFailure> {
        let mut request = self.client.request(method, url);

        for (key, value) in headers {
            request = request.header(key, value);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| RequestFailure::Transport {
            message: e.to_string(),
            // A builder error means the request never left the client;
            // everything else surfaced by send() is connectivity.
            request_sent: !e.is_builder(),
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RequestFailure::Transport {
                message: e.to_string(),
                request_sent: true,
            })?;

        Ok(RawResponse::new(status, body))
    }
}
