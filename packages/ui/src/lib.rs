//! This crate contains the shared UI: the route table, the session context,
//! the route guard and the pages behind it.

mod auth;
pub use auth::{use_auth, use_session, AuthState, LogoutButton, SessionHandle, SessionProvider};

mod guard;
pub use guard::{guard, resolve, resolve_route, Decision, RouteRequirements};

mod layout;
pub use layout::Guarded;

mod route;
pub use route::Route;

pub mod views;
