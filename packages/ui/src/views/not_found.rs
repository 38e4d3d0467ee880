use dioxus::prelude::*;

use crate::route::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen p-8",
            h1 { class: "mb-2 text-neutral-800 font-bold", "Page not found" }
            p { class: "mb-6 text-neutral-600", "Nothing lives at {path}." }
            Link { to: Route::RegisterDonator {}, "Back to start" }
        }
    }
}
