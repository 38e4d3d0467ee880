//! # Transport — the wire underneath [`ApiClient`](crate::ApiClient)
//!
//! [`Transport`] sends one fully-formed [`ApiRequest`] and hands back the raw
//! [`ApiResponse`]. It knows nothing about sessions: the bearer token is
//! already resolved into the request and status codes are not interpreted.
//! [`HttpTransport`] is the production implementation over `reqwest`.

use std::future::Future;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::settings::ApiSettings;

/// The backend could not be reached, or the reply could not be read.
#[derive(Debug, Clone, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

/// An outgoing request, relative to the backend base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// A backend reply with its body left undecoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Async trait for delivering requests to the backend.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>>;
}

/// `reqwest`-backed transport with a fixed base URL.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(settings: &ApiSettings) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            // The browser fetch API owns timeouts on wasm.
            #[cfg(not(target_arch = "wasm32"))]
            {
                builder = builder.timeout(Duration::from_secs(secs));
            }
            #[cfg(target_arch = "wasm32")]
            tracing::debug!("Ignoring request timeout of {}s in the browser", secs);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, self.url(&request.path));
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let transport = HttpTransport::new(&ApiSettings {
            base_url: "http://localhost:8080/".into(),
            request_timeout_secs: Some(5),
        })
        .unwrap();
        assert_eq!(transport.url("/aliments"), "http://localhost:8080/aliments");
        assert_eq!(
            transport.url("donation/filter/7"),
            "http://localhost:8080/donation/filter/7"
        );
    }
}
