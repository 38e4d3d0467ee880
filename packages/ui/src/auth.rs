//! Session context and hooks for the UI.

use std::sync::Arc;

use api::{
    ApiClient, Destination, HttpTransport, NavigationHistory, Role, Session, SessionStore,
    Settings,
};
use dioxus::prelude::*;
use store::KeyValueStore;

use crate::route::Route;

/// The two facts route guards care about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub role: Option<Role>,
}

impl AuthState {
    /// Read the derived getters of a live session. Never looks at persisted
    /// values, so a login in progress reads as signed out.
    pub fn from_session(session: &Session) -> Self {
        let snapshot = session.snapshot();
        Self {
            is_authenticated: snapshot.is_authenticated(),
            role: snapshot.role().cloned(),
        }
    }

    pub fn signed_in(role: Role) -> Self {
        Self {
            is_authenticated: true,
            role: Some(role),
        }
    }

    pub fn guest() -> Self {
        Self::default()
    }
}

/// Shared handle on the session store, provided through context.
#[derive(Clone)]
pub struct SessionHandle {
    store: Arc<SessionStore<HttpTransport>>,
    navigations: NavigationHistory,
}

impl SessionHandle {
    /// Build the store from settings and restore any persisted session.
    pub fn open() -> Result<Self, api::TransportError> {
        let settings = Settings::new().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default settings: {}", e);
            Settings::default()
        });
        let navigations = NavigationHistory::new();
        let session = Session::new(make_storage(&settings), Arc::new(navigations.clone()));
        session.restore();

        let transport = HttpTransport::new(&settings.api)?;
        let store = SessionStore::new(ApiClient::new(transport, session), settings.endpoints)
            .with_probe_strategy(settings.session.probe_strategy);
        Ok(Self {
            store: Arc::new(store),
            navigations,
        })
    }

    pub fn store(&self) -> &SessionStore<HttpTransport> {
        &self.store
    }

    pub fn session(&self) -> &Session {
        self.store.session()
    }

    /// Publish the current session to `auth` and hand back the latest
    /// navigation the session asked for, if any.
    pub fn sync(&self, mut auth: Signal<AuthState>) -> Option<Destination> {
        let state = AuthState::from_session(self.session());
        if *auth.peek() != state {
            auth.set(state);
        }
        self.navigations.take().pop()
    }
}

fn make_storage(settings: &Settings) -> Arc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        let _ = settings;
        Arc::new(store::LocalStorage::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let dir = settings
            .session
            .storage_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("donations")));
        match dir {
            Some(dir) => Arc::new(store::FileStore::new(dir)),
            None => Arc::new(store::MemoryStore::new()),
        }
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        let _ = settings;
        Arc::new(store::MemoryStore::new())
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Provider component that owns the session.
/// Wrap the router with this component so every page can reach it.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    // Opened once; the result never changes between renders.
    let handle = use_hook(SessionHandle::open);
    use_context_provider(|| {
        Signal::new(match &handle {
            Ok(handle) => AuthState::from_session(handle.session()),
            Err(_) => AuthState::guest(),
        })
    });

    match handle {
        Ok(handle) => {
            use_context_provider(|| handle);
            rsx! {
                {children}
            }
        }
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            rsx! {
                p { class: "error", "Unable to reach the donation service." }
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let handle = use_session();
    let auth = use_auth();
    let nav = use_navigator();

    let onclick = move |_| {
        let destination = handle.store().logout();
        handle.sync(auth);
        nav.replace(Route::from(destination));
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use api::{TOKEN_KEY, USER_KEY};
    use store::MemoryStore;

    fn restored(role: Option<&str>) -> Session {
        let storage = MemoryStore::new();
        if let Some(role) = role {
            storage.set(TOKEN_KEY, "t1").unwrap();
            storage
                .set(USER_KEY, &format!(r#"{{"role":"{role}"}}"#))
                .unwrap();
        }
        let session = Session::new(Arc::new(storage), Arc::new(NavigationHistory::new()));
        session.restore();
        session
    }

    #[test]
    fn test_state_from_restored_session() {
        assert_eq!(AuthState::from_session(&restored(None)), AuthState::guest());
        assert_eq!(
            AuthState::from_session(&restored(Some("donator"))),
            AuthState::signed_in(Role::Donator)
        );
        assert_eq!(
            AuthState::from_session(&restored(Some("admin"))),
            AuthState::signed_in(Role::Unknown("admin".into()))
        );
    }

    #[test]
    fn test_state_follows_logout() {
        let session = restored(Some("beneficiary"));
        assert!(AuthState::from_session(&session).is_authenticated);
        session.logout();
        assert_eq!(AuthState::from_session(&session), AuthState::guest());
    }
}
