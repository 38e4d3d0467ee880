mod login;
pub use login::Login;

mod register;
pub use register::{RegisterBeneficiary, RegisterDonator};

mod dashboard;
pub use dashboard::{BeneficiaryDashboard, DonatorDashboard};

mod aliments;
pub use aliments::DonatorAliments;

mod donations;
pub use donations::Donations;

mod not_found;
pub use not_found::NotFound;

use dioxus::prelude::*;
use serde_json::Value;

/// Donation window when the page does not ask for one.
const DEFAULT_DAYS: u32 = 7;

/// Inline error banner shared by the forms.
#[component]
fn ErrorBanner(message: String) -> Element {
    rsx! {
        div {
            class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
            "{message}"
        }
    }
}

/// One record as a definition list, in backend field order.
#[component]
fn RecordCard(fields: serde_json::Map<String, Value>) -> Element {
    rsx! {
        dl {
            class: "grid grid-cols-2 gap-1 p-3 border border-neutral-200 rounded",
            for (name, value) in fields {
                dt { class: "font-medium text-neutral-700", "{name}" }
                dd { class: "text-neutral-600", {display_value(&value)} }
            }
        }
    }
}

/// First value of `name` in a raw query string.
fn query_value(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("rice")), "rice");
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!(true)), "true");
    }

    #[test]
    fn test_query_value() {
        assert_eq!(query_value("days=30&page=2", "days").as_deref(), Some("30"));
        assert_eq!(query_value("aliment=a%2Fb", "aliment").as_deref(), Some("a/b"));
        assert_eq!(query_value("", "days"), None);
        assert_eq!(query_value("days", "days"), None);
    }
}
