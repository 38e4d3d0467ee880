use dioxus::prelude::*;

use super::{query_value, ErrorBanner, RecordCard, DEFAULT_DAYS};
use crate::auth::{use_auth, use_session};
use crate::route::Route;

/// Donations page for any signed-in account. `?days=<n>` sets the window.
#[component]
pub fn Donations(query: String) -> Element {
    let handle = use_session();
    let auth = use_auth();
    let nav = use_navigator();
    let days = query_value(&query, "days")
        .and_then(|days| days.parse::<u32>().ok())
        .unwrap_or(DEFAULT_DAYS);

    let donations = use_resource(use_reactive!(|(days,)| {
        let handle = handle.clone();
        async move {
            let result = handle
                .store()
                .client()
                .beneficiary()
                .filter_donations(days)
                .await;
            if result.is_err() {
                handle.sync(auth);
            }
            result.map_err(|e| e.to_string())
        }
    }));

    rsx! {
        section {
            class: "p-6 flex flex-col gap-4",
            h1 { class: "text-xl font-semibold", "Donations" }

            div {
                class: "flex gap-2 text-sm",
                for option in [7u32, 30, 90] {
                    button {
                        disabled: option == days,
                        onclick: move |_| {
                            nav.replace(Route::Donations { query: format!("days={option}") });
                        },
                        "Last {option} days"
                    }
                }
            }

            match &*donations.read_unchecked() {
                Some(Ok(list)) if list.is_empty() => rsx! { p { "No donations in this window." } },
                Some(Ok(list)) => rsx! {
                    for donation in list.iter().cloned() {
                        RecordCard { fields: donation.fields().clone() }
                    }
                },
                Some(Err(e)) => rsx! { ErrorBanner { message: e.clone() } },
                None => rsx! { p { "Loading..." } },
            }
        }
    }
}
