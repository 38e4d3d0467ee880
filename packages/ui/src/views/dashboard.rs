//! Role dashboards.

use api::{Donation, Record};
use dioxus::prelude::*;

use super::{query_value, ErrorBanner, RecordCard};
use crate::auth::{use_auth, use_session};
use crate::route::Route;

/// Donator home: a summary of their aliments and a donation form.
/// `?aliment=<id>` pre-fills the donation.
#[component]
pub fn DonatorDashboard(query: String) -> Element {
    let handle = use_session();
    let auth = use_auth();
    let mut aliment_id = use_signal(|| query_value(&query, "aliment").unwrap_or_default());
    let mut quantity = use_signal(String::new);
    let mut message = use_signal(|| Option::<Result<String, String>>::None);

    let summary = {
        let handle = handle.clone();
        use_resource(move || {
            let handle = handle.clone();
            async move {
                let result = handle.store().client().donator().list_aliments().await;
                if result.is_err() {
                    handle.sync(auth);
                }
                result.map(|aliments| aliments.len()).map_err(|e| e.to_string())
            }
        })
    };

    let handle_donate = move |evt: FormEvent| {
        evt.prevent_default();
        let handle = handle.clone();
        spawn(async move {
            let id = aliment_id().trim().to_string();
            if id.is_empty() {
                message.set(Some(Err("Choose an aliment to donate".to_string())));
                return;
            }
            let mut donation: Donation = Record::new().with("aliment_id", id);
            if let Ok(amount) = quantity().trim().parse::<u64>() {
                donation = donation.with("quantity", amount);
            }
            match handle.store().client().donator().create_donation(&donation).await {
                Ok(_) => {
                    aliment_id.set(String::new());
                    quantity.set(String::new());
                    message.set(Some(Ok("Donation created".to_string())));
                }
                Err(e) => {
                    handle.sync(auth);
                    message.set(Some(Err(e.to_string())));
                }
            }
        });
    };

    rsx! {
        section {
            class: "p-6 flex flex-col gap-4",
            h1 { class: "text-xl font-semibold", "Donator dashboard" }

            match &*summary.read_unchecked() {
                Some(Ok(count)) => rsx! {
                    p { "You have {count} aliments listed. " }
                    Link { to: Route::DonatorAliments { query: String::new() }, "Manage aliments" }
                },
                Some(Err(e)) => rsx! { ErrorBanner { message: e.clone() } },
                None => rsx! { p { "Loading..." } },
            }

            form {
                onsubmit: handle_donate,
                class: "flex flex-col gap-3 max-w-[320px]",
                h2 { class: "font-semibold", "Donate an aliment" }
                match message() {
                    Some(Ok(text)) => rsx! { p { class: "text-green-700", "{text}" } },
                    Some(Err(text)) => rsx! { ErrorBanner { message: text } },
                    None => rsx! {},
                }
                input {
                    r#type: "text",
                    placeholder: "Aliment id",
                    value: aliment_id(),
                    oninput: move |evt: FormEvent| aliment_id.set(evt.value()),
                }
                input {
                    r#type: "number",
                    placeholder: "Quantity",
                    value: quantity(),
                    oninput: move |evt: FormEvent| quantity.set(evt.value()),
                }
                button { r#type: "submit", "Donate" }
            }
        }
    }
}

/// Beneficiary home: recent donations, each with a way to reach its donator.
/// `?days=<n>` widens the window (default 7).
#[component]
pub fn BeneficiaryDashboard(query: String) -> Element {
    let handle = use_session();
    let auth = use_auth();
    let days = query_value(&query, "days")
        .and_then(|days| days.parse::<u32>().ok())
        .unwrap_or(super::DEFAULT_DAYS);
    let mut donator = use_signal(|| Option::<Result<Record, String>>::None);

    let donations = {
        let handle = handle.clone();
        use_resource(use_reactive!(|(days,)| {
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
        }))
    };

    let show_donator = move |id: String| {
        let handle = handle.clone();
        spawn(async move {
            let result = handle
                .store()
                .client()
                .beneficiary()
                .donator_for_donation(&id)
                .await;
            if result.is_err() {
                handle.sync(auth);
            }
            donator.set(Some(result.map_err(|e| e.to_string())));
        });
    };

    rsx! {
        section {
            class: "p-6 flex flex-col gap-4",
            h1 { class: "text-xl font-semibold", "Donations from the last {days} days" }

            match &*donations.read_unchecked() {
                Some(Ok(list)) if list.is_empty() => rsx! { p { "No donations yet." } },
                Some(Ok(list)) => rsx! {
                    for donation in list.iter().cloned() {
                        div {
                            class: "flex flex-col gap-1",
                            RecordCard { fields: donation.fields().clone() }
                            if let Some(id) = donation.id() {
                                button {
                                    class: "self-start text-sm underline",
                                    onclick: {
                                        let mut show_donator = show_donator.clone();
                                        move |_| show_donator(id.clone())
                                    },
                                    "Who donated this?"
                                }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! { ErrorBanner { message: e.clone() } },
                None => rsx! { p { "Loading..." } },
            }

            match donator() {
                Some(Ok(info)) => rsx! {
                    h2 { class: "font-semibold", "Donator" }
                    RecordCard { fields: info.fields().clone() }
                },
                Some(Err(e)) => rsx! { ErrorBanner { message: e } },
                None => rsx! {},
            }
        }
    }
}
