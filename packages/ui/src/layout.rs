use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::guard::{guard, RouteRequirements};
use crate::route::Route;

/// Layout wrapping every gated page. Re-runs the guard whenever the route or
/// the session changes, so an expired session bounces straight to login.
#[component]
pub fn Guarded() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let state = auth();
    let decision = guard(&state, &route, &RouteRequirements::of(&route));
    if let Some(target) = decision.redirect(&route) {
        tracing::debug!("Redirecting {} to {}", route, target);
        nav.replace(target);
        return rsx! {};
    }

    rsx! {
        if state.is_authenticated {
            header {
                class: "flex items-center justify-between px-4 py-2 border-b border-neutral-200",
                span { class: "text-sm font-semibold", "Donations" }
                if let Some(role) = state.role.clone() {
                    span { class: "text-sm text-neutral-600", "{role}" }
                }
                LogoutButton { class: "text-sm" }
            }
        }
        main {
            class: "flex-1 overflow-y-auto",
            Outlet::<Route> {}
        }
    }
}
