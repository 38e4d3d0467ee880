use dioxus::prelude::*;

use ui::{Route, SessionProvider};

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        SessionProvider {
            Router::<Route> {}
        }
    }
}
