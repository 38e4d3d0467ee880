//! # HTTP client wrapper
//!
//! Every backend call goes through [`ApiClient`]. It applies two policies on
//! behalf of all call sites:
//!
//! - **Request**: if the [`Session`] holds a credential, it is attached as a
//!   bearer token.
//! - **Response**: a 401 forces a logout through the session (clear, then
//!   navigate to login) and the original error is returned unchanged.
//!
//! Role probes during login pass through here as well; the session suppresses
//! the forced logout while a login is in flight.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub struct ApiClient<T> {
    transport: T,
    session: Session,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: Session) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let value = self.send(Method::GET, path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let value = self.send(Method::POST, path, Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Send a request and decode a successful body as JSON. An empty body
    /// decodes as `null`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let response = self.send_raw(method, path, body).await?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Send a request through both interceptors without decoding the body.
    /// Non-success statuses become [`ApiError`]s.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest {
            bearer: self.session.credential().map(|c| c.as_str().to_string()),
            method,
            path: path.to_string(),
            body,
        };
        tracing::debug!("{} {}", request.method, request.path);

        let response = self.transport.send(request).await?;
        if response.status.is_success() {
            return Ok(response);
        }

        let error = ApiError::from_response(response.status, &response.body);
        if response.status == StatusCode::UNAUTHORIZED {
            self.session.expire();
        }
        Err(error)
    }
}
