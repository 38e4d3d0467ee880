//! # API crate — session and backend access for the donation client
//!
//! Everything the front ends need to talk to the donation backend: who the
//! user is, whether they are signed in, and the calls they may make.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`SessionStore`] (restore / login / logout / register) and role inference |
//! | [`client`] | [`ApiClient`], the single outbound gateway: bearer injection, forced logout on 401 |
//! | [`transport`] | [`Transport`] trait and the `reqwest`-backed [`HttpTransport`] |
//! | [`session`] | [`Session`], the shared credential + identity state and its persistence |
//! | [`navigation`] | [`Destination`] and the [`Navigator`] the session pushes destinations to |
//! | [`models`] | [`Credential`], [`Identity`], [`Role`] and backend records |
//! | [`services`] | Donator and beneficiary CRUD |
//! | [`settings`] | Layered configuration: defaults, `config.toml`, environment |
//! | [`error`] | [`ApiError`] and [`AuthError`] |
//!
//! ## Wiring
//!
//! ```no_run
//! use std::sync::Arc;
//! use api::{ApiClient, HttpTransport, NavigationHistory, Session, SessionStore, Settings};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::new()?;
//! let session = Session::new(
//!     Arc::new(store::MemoryStore::new()),
//!     Arc::new(NavigationHistory::new()),
//! );
//! let client = ApiClient::new(HttpTransport::new(&settings.api)?, session);
//! let store = SessionStore::new(client, settings.endpoints)
//!     .with_probe_strategy(settings.session.probe_strategy);
//!
//! store.restore();
//! let landing = store
//!     .login(&serde_json::json!({"username": "d1", "password": "x"}))
//!     .await?;
//! println!("landing on {landing}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;
pub mod session;
pub mod settings;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{infer_role, ProbeStrategy, SessionStore};
pub use client::ApiClient;
pub use error::{ApiError, AuthError};
pub use models::{Aliment, Credential, Donation, DonatorInfo, Identity, Record, Role};
pub use navigation::{Destination, NavigationHistory, Navigator};
pub use services::{BeneficiaryService, DonatorService};
pub use session::{Session, SessionState, TOKEN_KEY, USER_KEY};
pub use settings::{ApiSettings, Endpoints, SessionSettings, Settings};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport, TransportError};
