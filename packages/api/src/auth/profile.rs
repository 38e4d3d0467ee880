//! Best-effort profile enrichment after the role is known.

use serde_json::{Map, Value};

use crate::client::ApiClient;
use crate::transport::Transport;

/// Fetch profile fields from `endpoint`. Failures are logged and yield an
/// empty profile; they never fail the login.
pub(crate) async fn fetch_profile<T: Transport>(
    client: &ApiClient<T>,
    endpoint: &str,
) -> Map<String, Value> {
    match client.get::<Value>(endpoint).await {
        Ok(payload) => profile_fields(payload).unwrap_or_else(|| {
            tracing::warn!("Profile from {} is not an object, ignoring", endpoint);
            Map::new()
        }),
        Err(e) => {
            tracing::warn!("Could not fetch profile from {}: {}", endpoint, e);
            Map::new()
        }
    }
}

/// `{creds, data}` replies are merged (data wins); other objects are used as is.
fn profile_fields(payload: Value) -> Option<Map<String, Value>> {
    let Value::Object(mut fields) = payload else {
        return None;
    };

    let split = matches!(
        (fields.get("creds"), fields.get("data")),
        (Some(Value::Object(_)), Some(Value::Object(_)))
    );
    if !split {
        tracing::debug!("Profile reply has no creds/data split, using it flat");
        return Some(fields);
    }

    let mut merged = Map::new();
    for part in ["creds", "data"] {
        if let Some(Value::Object(part)) = fields.remove(part) {
            merged.extend(part);
        }
    }
    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_profile_is_merged() {
        let fields = profile_fields(json!({
            "creds": {"email": "d1@example.org", "name": "old"},
            "data": {"name": "Donor One", "city": "Lima"}
        }))
        .unwrap();
        assert_eq!(
            Value::Object(fields),
            json!({"email": "d1@example.org", "name": "Donor One", "city": "Lima"})
        );
    }

    #[test]
    fn test_flat_profile_is_kept() {
        let fields = profile_fields(json!({"email": "b@example.org", "creds": null})).unwrap();
        assert_eq!(
            Value::Object(fields),
            json!({"email": "b@example.org", "creds": null})
        );
    }

    #[test]
    fn test_non_object_profile_is_rejected() {
        assert!(profile_fields(json!(["a"])).is_none());
        assert!(profile_fields(Value::Null).is_none());
    }
}
