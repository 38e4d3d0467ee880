//! Registration pages for both account kinds.

use dioxus::prelude::*;
use serde_json::{json, Value};

use super::ErrorBanner;
use crate::auth::use_session;
use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Account {
    Donator,
    Beneficiary,
}

#[component]
pub fn RegisterDonator() -> Element {
    rsx! {
        RegisterForm { account: Account::Donator }
    }
}

#[component]
pub fn RegisterBeneficiary() -> Element {
    rsx! {
        RegisterForm { account: Account::Beneficiary }
    }
}

#[component]
fn RegisterForm(account: Account) -> Element {
    let handle = use_session();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let handle = handle.clone();
        spawn(async move {
            error.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let u = username().trim().to_string();
            if n.is_empty() || u.is_empty() {
                error.set(Some("Name and username are required".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }

            loading.set(true);
            let data = json!({ "name": n, "email": e, "username": u, "password": password() });
            let result: Result<Value, _> = match account {
                Account::Donator => handle.store().register_donator(&data).await,
                Account::Beneficiary => handle.store().register_beneficiary(&data).await,
            };
            loading.set(false);
            match result {
                Ok(_) => {
                    nav.push(Route::login());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let (title, other, other_label) = match account {
        Account::Donator => (
            "Register as donator",
            Route::RegisterBeneficiary {},
            "I need donations instead",
        ),
        Account::Beneficiary => (
            "Register as beneficiary",
            Route::RegisterDonator {},
            "I want to donate instead",
        ),
    };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen p-8 bg-white",

            h1 { class: "mb-8 text-neutral-800 font-bold text-[1.75rem]", "{title}" }

            form {
                onsubmit: handle_register,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                if let Some(err) = error() {
                    ErrorBanner { message: err }
                }

                input {
                    r#type: "text",
                    placeholder: "Name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    r#type: "text",
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Create account" }
                }
            }

            p {
                class: "mt-6 text-sm text-neutral-600",
                Link { to: other, "{other_label}" }
                " · "
                Link { to: Route::login(), "Already registered? Sign in" }
            }
        }
    }
}
