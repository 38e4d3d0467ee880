//! # Session state
//!
//! [`Session`] owns the current [`Credential`] and [`Identity`] and is the
//! only writer of their persisted copies (`authToken` and `authUser` in the
//! injected [`KeyValueStore`]). It is a cheap, cloneable handle: the HTTP
//! wrapper reads the credential from it and forces a logout through it, the
//! router reads the derived getters, and the session store drives login.
//!
//! ## Invariants
//!
//! - Authenticated iff a non-empty credential and an identity with a
//!   non-empty role are both present.
//! - `authUser` is only ever written together with a role.
//! - Restoring validates both persisted keys together; a partial or
//!   malformed pair is discarded entirely.
//! - Clearing is idempotent, so the login sequence and the 401 interceptor
//!   may both clear without ordering concerns. While a login is in flight the
//!   interceptor leaves clearing to the login sequence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use store::{KeyValueStore, StoreError};

use crate::error::AuthError;
use crate::models::{Credential, Identity, Role};
use crate::navigation::{Destination, Navigator};

/// Persisted key for the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Persisted key for the serialized identity.
pub const USER_KEY: &str = "authUser";

/// A point-in-time copy of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub credential: Option<Credential>,
    pub identity: Option<Identity>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        let has_credential = self.credential.as_ref().is_some_and(|c| !c.is_empty());
        let has_role = self.identity.as_ref().is_some_and(|i| !i.role.is_empty());
        has_credential && has_role
    }

    pub fn role(&self) -> Option<&Role> {
        self.identity.as_ref().map(|i| &i.role)
    }
}

#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<SessionState>,
    storage: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
    login_in_flight: AtomicBool,
}

/// Marks a login sequence as in flight until dropped.
pub(crate) struct LoginGuard {
    session: Session,
}

impl Drop for LoginGuard {
    fn drop(&mut self) {
        self.session
            .inner
            .login_in_flight
            .store(false, Ordering::Release);
    }
}

impl Session {
    /// Create an empty session. Call [`restore`](Self::restore) to pick up a
    /// persisted one.
    pub fn new(storage: Arc<dyn KeyValueStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(SessionState::default()),
                storage,
                navigator,
                login_in_flight: AtomicBool::new(false),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionState {
        self.state().clone()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.state().credential.clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state().identity.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.state().role().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    pub fn is_donator(&self) -> bool {
        self.state().role() == Some(&Role::Donator)
    }

    pub fn is_beneficiary(&self) -> bool {
        self.state().role() == Some(&Role::Beneficiary)
    }

    pub fn login_in_flight(&self) -> bool {
        self.inner.login_in_flight.load(Ordering::Acquire)
    }

    /// Load the persisted session, if both halves are present and valid.
    /// Otherwise both persisted keys are removed and the session stays empty.
    /// Returns whether a session was restored.
    pub fn restore(&self) -> bool {
        let token = read_present(self.inner.storage.as_ref(), TOKEN_KEY);
        let user = read_present(self.inner.storage.as_ref(), USER_KEY);

        let restored = match (token, user) {
            (Some(token), Some(user)) => match Identity::from_persisted(&user) {
                Ok(identity) => Some((Credential::new(token), identity)),
                Err(e) => {
                    tracing::warn!("Discarding persisted session, invalid {}: {}", USER_KEY, e);
                    None
                }
            },
            (Some(_), None) => {
                tracing::warn!("Discarding persisted token without {}", USER_KEY);
                None
            }
            (None, Some(_)) => {
                tracing::warn!("Discarding persisted {} without token", USER_KEY);
                None
            }
            (None, None) => None,
        };

        match restored {
            Some((credential, identity)) => {
                tracing::info!("Restored {} session", identity.role);
                let mut state = self.state();
                state.credential = Some(credential);
                state.identity = Some(identity);
                true
            }
            None => {
                self.clear();
                false
            }
        }
    }

    /// Store the token in memory and in persistent storage.
    pub(crate) fn set_credential(&self, credential: Credential) -> Result<(), StoreError> {
        let mut state = self.state();
        self.inner.storage.set(TOKEN_KEY, credential.as_str())?;
        state.credential = Some(credential);
        Ok(())
    }

    /// Persist the resolved identity beside the already-stored credential.
    /// This is the point at which the session becomes authenticated.
    pub(crate) fn establish(&self, identity: Identity) -> Result<(), AuthError> {
        let payload = identity.to_persisted().map_err(AuthError::Encode)?;
        let mut state = self.state();
        self.inner.storage.set(USER_KEY, &payload)?;
        state.identity = Some(identity);
        Ok(())
    }

    /// Drop the session from memory and persistent storage.
    pub fn clear(&self) {
        let mut state = self.state();
        state.credential = None;
        state.identity = None;
        self.inner.storage.remove(TOKEN_KEY);
        self.inner.storage.remove(USER_KEY);
    }

    /// Clear the session and send the user to the login page.
    pub fn logout(&self) -> Destination {
        self.clear();
        tracing::info!("Session cleared");
        let destination = Destination::Login;
        self.navigate(destination);
        destination
    }

    /// Forced logout on a 401. Suppressed while a login sequence is in
    /// flight; that sequence clears the session itself on failure.
    pub(crate) fn expire(&self) {
        if self.login_in_flight() {
            tracing::debug!("401 during login, leaving session handling to login");
            return;
        }
        tracing::warn!("Session expired or rejected by backend, logging out");
        self.logout();
    }

    pub(crate) fn navigate(&self, destination: Destination) {
        self.inner.navigator.navigate(destination);
    }

    /// Claim the login slot. `None` if a login is already running.
    pub(crate) fn begin_login(&self) -> Option<LoginGuard> {
        self.inner
            .login_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoginGuard {
                session: self.clone(),
            })
    }
}

/// Read a persisted value, treating empty and stringified-nothing values as absent.
fn read_present(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    storage
        .get(key)
        .filter(|value| !matches!(value.trim(), "" | "undefined" | "null"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationHistory;
    use store::MemoryStore;

    fn session_with(storage: &MemoryStore) -> (Session, NavigationHistory) {
        let history = NavigationHistory::new();
        let session = Session::new(Arc::new(storage.clone()), Arc::new(history.clone()));
        (session, history)
    }

    #[test]
    fn test_restore_valid_session() {
        let storage = MemoryStore::with_entries([
            (TOKEN_KEY, "t1"),
            (USER_KEY, r#"{"role":"donator","email":"d1@example.org"}"#),
        ]);
        let (session, _) = session_with(&storage);

        assert!(session.restore());
        assert!(session.is_authenticated());
        assert!(session.is_donator());
        assert!(!session.is_beneficiary());
        assert_eq!(session.credential().unwrap().as_str(), "t1");
        assert_eq!(session.role(), Some(Role::Donator));

        // Idempotent
        assert!(session.restore());
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_restore_discards_malformed_identity() {
        let payloads = [
            None,
            Some("undefined"),
            Some("null"),
            Some(""),
            Some("{not json"),
            Some(r#"{"email":"x"}"#),
            Some(r#"{"role":""}"#),
            Some("[]"),
        ];
        for payload in payloads {
            let storage = MemoryStore::with_entries([(TOKEN_KEY, "t1")]);
            if let Some(payload) = payload {
                storage.set(USER_KEY, payload).unwrap();
            }
            let (session, _) = session_with(&storage);

            assert!(!session.restore(), "restored with {payload:?}");
            assert!(!session.is_authenticated());
            assert!(session.credential().is_none());
            assert!(session.identity().is_none());
            assert!(!storage.contains(TOKEN_KEY), "token kept with {payload:?}");
            assert!(!storage.contains(USER_KEY), "user kept with {payload:?}");
        }
    }

    #[test]
    fn test_restore_discards_identity_without_token() {
        for token in [None, Some("undefined"), Some("")] {
            let storage = MemoryStore::with_entries([(USER_KEY, r#"{"role":"donator"}"#)]);
            if let Some(token) = token {
                storage.set(TOKEN_KEY, token).unwrap();
            }
            let (session, _) = session_with(&storage);

            assert!(!session.restore());
            assert!(session.identity().is_none());
            assert!(storage.is_empty());
        }
    }

    #[test]
    fn test_is_authenticated_truth_table() {
        let credential = || Some(Credential::new("t1"));
        let identity = |role: &str| Some(Identity::new(Role::from(role)));

        let cases = [
            (None, None, false),
            (credential(), None, false),
            (None, identity("donator"), false),
            (Some(Credential::new("")), identity("donator"), false),
            (credential(), identity(""), false),
            (credential(), identity("donator"), true),
            (credential(), identity("beneficiary"), true),
            (credential(), identity("admin"), true),
        ];
        for (credential, identity, expected) in cases {
            let state = SessionState {
                credential: credential.clone(),
                identity: identity.clone(),
            };
            assert_eq!(
                state.is_authenticated(),
                expected,
                "credential={credential:?} identity={identity:?}"
            );
        }
    }

    #[test]
    fn test_logout_clears_and_navigates() {
        let storage = MemoryStore::with_entries([
            (TOKEN_KEY, "t1"),
            (USER_KEY, r#"{"role":"beneficiary"}"#),
        ]);
        let (session, history) = session_with(&storage);
        session.restore();

        assert_eq!(session.logout(), Destination::Login);
        assert!(!session.is_authenticated());
        assert!(storage.is_empty());
        assert_eq!(history.entries(), vec![Destination::Login]);

        // Always succeeds, even with nothing to clear
        assert_eq!(session.logout(), Destination::Login);
    }

    #[test]
    fn test_expire_is_suppressed_during_login() {
        let storage = MemoryStore::new();
        let (session, history) = session_with(&storage);
        session.set_credential(Credential::new("t1")).unwrap();

        let guard = session.begin_login().unwrap();
        assert!(session.begin_login().is_none());
        session.expire();
        assert!(session.credential().is_some());
        assert!(history.entries().is_empty());

        drop(guard);
        assert!(!session.login_in_flight());
        session.expire();
        assert!(session.credential().is_none());
        assert_eq!(history.entries(), vec![Destination::Login]);
    }
}
