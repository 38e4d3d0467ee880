//! Aliment management for donators.

use api::{Aliment, Record};
use dioxus::prelude::*;

use super::{query_value, ErrorBanner, RecordCard};
use crate::auth::{use_auth, use_session};

/// Lists the donator's aliments with create and delete. `?id=<id>` opens the
/// detail of one aliment.
#[component]
pub fn DonatorAliments(query: String) -> Element {
    let handle = use_session();
    let auth = use_auth();
    let selected = query_value(&query, "id");
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    let mut aliments = {
        let handle = handle.clone();
        use_resource(move || {
            let handle = handle.clone();
            async move {
                let result = handle.store().client().donator().list_aliments().await;
                if result.is_err() {
                    handle.sync(auth);
                }
                result.map_err(|e| e.to_string())
            }
        })
    };

    let detail = {
        let handle = handle.clone();
        use_resource(use_reactive!(|(selected,)| {
            let handle = handle.clone();
            async move {
                let id = selected?;
                let result = handle.store().client().donator().get_aliment(&id).await;
                if result.is_err() {
                    handle.sync(auth);
                }
                Some(result.map_err(|e| e.to_string()))
            }
        }))
    };

    let handle_create = {
        let handle = handle.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let handle = handle.clone();
            spawn(async move {
                error.set(None);
                let n = name().trim().to_string();
                if n.is_empty() {
                    error.set(Some("Name is required".to_string()));
                    return;
                }
                let mut aliment: Aliment = Record::new().with("name", n);
                let d = description().trim().to_string();
                if !d.is_empty() {
                    aliment = aliment.with("description", d);
                }
                match handle.store().client().donator().create_aliment(&aliment).await {
                    Ok(_) => {
                        name.set(String::new());
                        description.set(String::new());
                        aliments.restart();
                    }
                    Err(e) => {
                        handle.sync(auth);
                        error.set(Some(e.to_string()));
                    }
                }
            });
        }
    };

    let delete = move |id: String| {
        let handle = handle.clone();
        spawn(async move {
            match handle.store().client().donator().delete_aliment(&id).await {
                Ok(()) => aliments.restart(),
                Err(e) => {
                    handle.sync(auth);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        section {
            class: "p-6 flex flex-col gap-4",
            h1 { class: "text-xl font-semibold", "My aliments" }

            if let Some(err) = error() {
                ErrorBanner { message: err }
            }

            match &*detail.read_unchecked() {
                Some(Some(Ok(aliment))) => rsx! {
                    h2 { class: "font-semibold", "Selected aliment" }
                    RecordCard { fields: aliment.fields().clone() }
                },
                Some(Some(Err(e))) => rsx! { ErrorBanner { message: e.clone() } },
                _ => rsx! {},
            }

            match &*aliments.read_unchecked() {
                Some(Ok(list)) if list.is_empty() => rsx! { p { "No aliments listed yet." } },
                Some(Ok(list)) => rsx! {
                    for aliment in list.iter().cloned() {
                        div {
                            class: "flex flex-col gap-1",
                            RecordCard { fields: aliment.fields().clone() }
                            if let Some(id) = aliment.id() {
                                button {
                                    class: "self-start text-sm text-red-600",
                                    onclick: {
                                        let mut delete = delete.clone();
                                        move |_| delete(id.clone())
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! { ErrorBanner { message: e.clone() } },
                None => rsx! { p { "Loading..." } },
            }

            form {
                onsubmit: handle_create,
                class: "flex flex-col gap-3 max-w-[320px]",
                h2 { class: "font-semibold", "Add an aliment" }
                input {
                    r#type: "text",
                    placeholder: "Name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                input {
                    r#type: "text",
                    placeholder: "Description",
                    value: description(),
                    oninput: move |evt: FormEvent| description.set(evt.value()),
                }
                button { r#type: "submit", "Add" }
            }
        }
    }
}
