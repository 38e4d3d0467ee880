//! Scripted transport for exercising the session flow without a backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::{Method, StatusCode};

use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};

#[derive(Clone)]
enum Reply {
    Response(ApiResponse),
    Fail(String),
}

/// Answers each `(method, path)` with a fixed reply and records every request.
/// Unscripted routes answer 404.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    replies: Arc<Mutex<HashMap<(Method, String), Reply>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.script(method, path, status, body);
        self
    }

    /// Replace the reply for a route on a transport that is already in use.
    pub(crate) fn script(&self, method: Method, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        self.replies.lock().unwrap().insert(
            (method, path.to_string()),
            Reply::Response(ApiResponse::new(status, body)),
        );
    }

    pub(crate) fn fail(self, method: Method, path: &str, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Reply::Fail(message.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// How many requests hit `path`, any method.
    pub(crate) fn calls(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method.clone(), request.path.clone());
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().get(&key).cloned();
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(TransportError(message)),
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND, "")),
        }
    }
}
