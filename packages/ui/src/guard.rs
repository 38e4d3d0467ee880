//! # Route guard
//!
//! [`guard`] decides whether a navigation may proceed. Checks run in a fixed
//! order and the first one that applies wins:
//!
//! 1. Guest-only route while signed in → the user's dashboard.
//! 2. Authenticated route while signed out → login, remembering the target.
//! 3. Role-restricted route for another role → the user's own dashboard, or
//!    not-found when their role has none.
//! 4. Otherwise allow.
//!
//! Every redirect target is itself allowed for the same user, so a single
//! pass always settles on the page to show.

use api::Role;

use crate::auth::AuthState;
use crate::route::Route;

/// What a route asks of the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRequirements {
    pub guest_only: bool,
    pub requires_auth: bool,
    pub role: Option<Role>,
}

impl RouteRequirements {
    pub fn of(route: &Route) -> Self {
        match route {
            Route::Login { .. } | Route::RegisterDonator {} | Route::RegisterBeneficiary {} => {
                Self {
                    guest_only: true,
                    ..Self::default()
                }
            }
            Route::Donations { .. } => Self {
                requires_auth: true,
                ..Self::default()
            },
            Route::DonatorDashboard { .. } | Route::DonatorAliments { .. } => Self {
                requires_auth: true,
                role: Some(Role::Donator),
                ..Self::default()
            },
            Route::BeneficiaryDashboard { .. } => Self {
                requires_auth: true,
                role: Some(Role::Beneficiary),
                ..Self::default()
            },
            Route::NotFound { .. } => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Allow,
    RedirectToDashboard(Route),
    RedirectToLogin { return_path: String },
    RedirectToNotFound,
}

impl Decision {
    /// Where a redirecting decision sends the user.
    pub fn redirect(&self, from: &Route) -> Option<Route> {
        match self {
            Decision::Allow => None,
            Decision::RedirectToDashboard(route) => Some(route.clone()),
            Decision::RedirectToLogin { return_path } => Some(Route::Login {
                redirect: return_path.clone(),
            }),
            Decision::RedirectToNotFound => Some(Route::not_found(&from.full_path())),
        }
    }
}

pub fn guard(auth: &AuthState, target: &Route, requirements: &RouteRequirements) -> Decision {
    if requirements.guest_only && auth.is_authenticated {
        let dashboard = auth
            .role
            .as_ref()
            .map(Route::landing_for)
            .unwrap_or_else(|| Route::from(api::Destination::Donations));
        return Decision::RedirectToDashboard(dashboard);
    }

    if requirements.requires_auth && !auth.is_authenticated {
        return Decision::RedirectToLogin {
            return_path: target.full_path(),
        };
    }

    if let Some(required) = &requirements.role {
        if auth.is_authenticated && auth.role.as_ref() != Some(required) {
            tracing::warn!(
                "Access denied to {}: requires {}, user is {:?}",
                target,
                required,
                auth.role.as_ref().map(Role::as_str)
            );
            return match auth.role.as_ref().and_then(Route::dashboard_for) {
                Some(dashboard) => Decision::RedirectToDashboard(dashboard),
                None => Decision::RedirectToNotFound,
            };
        }
    }

    Decision::Allow
}

/// The page actually shown for `route`.
pub fn resolve_route(auth: &AuthState, route: Route) -> Route {
    let decision = guard(auth, &route, &RouteRequirements::of(&route));
    match decision.redirect(&route) {
        Some(next) => {
            tracing::debug!("Redirecting {} to {}", route, next);
            next
        }
        None => route,
    }
}

/// Parse `path` and resolve it for `auth`.
pub fn resolve(auth: &AuthState, path: &str) -> Route {
    resolve_route(auth, Route::from_path(path))
}
