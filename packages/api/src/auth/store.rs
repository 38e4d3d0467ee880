//! # Session store
//!
//! [`SessionStore`] drives the session lifecycle on top of an [`ApiClient`]:
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`restore`](SessionStore::restore) | Load the persisted session at startup; no network. |
//! | [`login`](SessionStore::login) | Token → role inference → profile → persist → landing destination. |
//! | [`logout`](SessionStore::logout) | Clear everything and go to the login page. |
//! | [`register_donator`](SessionStore::register_donator) / [`register_beneficiary`](SessionStore::register_beneficiary) | Pass-through registration. |
//!
//! ## Login sequence
//!
//! 1. Clear any previous session.
//! 2. `POST` the credentials; the reply must carry a `token`.
//! 3. Store the token (memory + storage) so the probes carry it.
//! 4. [`infer_role`](super::infer_role).
//! 5. Fetch the profile, best effort.
//! 6. Persist the identity. The session is established from here on.
//! 7. Navigate to the role's landing destination and return it.
//!
//! Any failure clears the session before the error is returned. Only one
//! login may run at a time; a concurrent call fails with
//! [`AuthError::LoginInProgress`] without touching the session.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::profile::fetch_profile;
use super::role::{infer_role, ProbeStrategy};
use crate::client::ApiClient;
use crate::error::{ApiError, AuthError};
use crate::models::{Credential, Identity};
use crate::navigation::Destination;
use crate::session::Session;
use crate::settings::Endpoints;
use crate::transport::Transport;

pub struct SessionStore<T> {
    client: ApiClient<T>,
    endpoints: Endpoints,
    strategy: ProbeStrategy,
}

impl<T: Transport> SessionStore<T> {
    pub fn new(client: ApiClient<T>, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            strategy: ProbeStrategy::default(),
        }
    }

    /// Builder method to set the role probe strategy.
    pub fn with_probe_strategy(mut self, strategy: ProbeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Load the persisted session. Returns whether one was restored.
    pub fn restore(&self) -> bool {
        self.session().restore()
    }

    /// Authenticate with `credentials`, forwarded verbatim to the login
    /// endpoint, and return where the user should land.
    pub async fn login<C: Serialize + ?Sized>(
        &self,
        credentials: &C,
    ) -> Result<Destination, AuthError> {
        let session = self.session();
        let _guard = session.begin_login().ok_or(AuthError::LoginInProgress)?;
        session.clear();

        match self.authenticate(credentials).await {
            Ok(identity) => {
                tracing::info!("Authenticated as {}", identity.role);
                let landing = Destination::landing_for(&identity.role);
                session.navigate(landing);
                Ok(landing)
            }
            Err(e) => {
                session.clear();
                tracing::error!("Login failed: {}", e);
                Err(e)
            }
        }
    }

    async fn authenticate<C: Serialize + ?Sized>(&self, credentials: &C) -> Result<Identity, AuthError> {
        let body = serde_json::to_value(credentials).map_err(ApiError::from)?;
        let reply = match self
            .client
            .send(Method::POST, &self.endpoints.login, Some(body))
            .await
        {
            Ok(reply) => reply,
            Err(ApiError::Decode(_)) => return Err(AuthError::InvalidResponse),
            Err(e) => return Err(e.into()),
        };

        let token = reply
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::InvalidResponse)?;
        self.session().set_credential(Credential::new(token))?;

        let role = infer_role(&self.client, &self.endpoints, self.strategy).await?;
        let profile = fetch_profile(&self.client, &self.endpoints.account).await;

        let identity = Identity::with_profile(role, profile);
        self.session().establish(identity.clone())?;
        Ok(identity)
    }

    /// Clear the session and return the login destination.
    pub fn logout(&self) -> Destination {
        self.session().logout()
    }

    pub async fn register_donator<D: Serialize + ?Sized>(&self, data: &D) -> Result<Value, AuthError> {
        self.register(&self.endpoints.register_donator, data).await
    }

    pub async fn register_beneficiary<D: Serialize + ?Sized>(
        &self,
        data: &D,
    ) -> Result<Value, AuthError> {
        self.register(&self.endpoints.register_beneficiary, data).await
    }

    async fn register<D: Serialize + ?Sized>(&self, endpoint: &str, data: &D) -> Result<Value, AuthError> {
        self.client.post(endpoint, data).await.map_err(|e| {
            tracing::error!("Registration at {} failed: {}", endpoint, e);
            AuthError::RegistrationFailed(e)
        })
    }
}
