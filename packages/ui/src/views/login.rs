//! Login page view with username/password form.

use dioxus::prelude::*;
use serde_json::json;

use super::ErrorBanner;
use crate::auth::{use_auth, use_session};
use crate::route::Route;

/// Login page component. `redirect` is the page that sent the user here.
#[component]
pub fn Login(redirect: String) -> Element {
    let handle = use_session();
    let auth = use_auth();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let handle = handle.clone();
        spawn(async move {
            error.set(None);

            let user = username().trim().to_string();
            if user.is_empty() || password().is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }

            loading.set(true);
            let credentials = json!({ "username": user, "password": password() });
            let result = handle.store().login(&credentials).await;
            handle.sync(auth);
            loading.set(false);
            match result {
                Ok(landing) => {
                    nav.replace(Route::from(landing));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen p-8 bg-white",

            h1 { class: "mb-2 text-neutral-800 font-bold text-[1.75rem]", "Sign in" }

            if !redirect.is_empty() {
                p {
                    class: "mb-8 text-neutral-600 text-[0.9375rem]",
                    "Sign in to continue to {redirect}"
                }
            }

            form {
                onsubmit: handle_login,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                if let Some(err) = error() {
                    ErrorBanner { message: err }
                }

                input {
                    class: "w-full",
                    r#type: "text",
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                input {
                    class: "w-full",
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "mt-6 text-sm text-neutral-600",
                "No account yet? "
                Link { to: Route::RegisterDonator {}, "Register as donator" }
                " or "
                Link { to: Route::RegisterBeneficiary {}, "register as beneficiary" }
            }
        }
    }
}
