//! # Session models
//!
//! - [`Credential`] — the opaque bearer token handed out by `POST /login`.
//!   Its `Debug` output is redacted so it never lands in logs.
//! - [`Role`] — `donator`, `beneficiary`, or a role string this client does
//!   not know (only reachable through restored state; inference never
//!   produces it).
//! - [`Identity`] — the resolved role plus whatever profile fields the
//!   backend returned. Serialized flat, e.g.
//!   `{"role":"donator","email":"d1@example.org"}`, which is the shape kept
//!   under the `authUser` key.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Donator,
    Beneficiary,
    Unknown(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Donator => "donator",
            Role::Beneficiary => "beneficiary",
            Role::Unknown(role) => role,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "donator" => Role::Donator,
            "beneficiary" => Role::Beneficiary,
            _ => Role::Unknown(role),
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Role::from(role.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unknown(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user: a role plus free-form profile fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub role: Role,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Identity {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            profile: Map::new(),
        }
    }

    /// Build an identity from profile fields. A `role` field in the profile
    /// is dropped; `role` always wins.
    pub fn with_profile(role: Role, mut profile: Map<String, Value>) -> Self {
        profile.remove("role");
        Self { role, profile }
    }

    /// Look up a profile field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.profile.get(field)
    }

    /// Parse the persisted `authUser` payload. Anything without a non-empty
    /// string `role` is rejected.
    pub fn from_persisted(raw: &str) -> Result<Self, serde_json::Error> {
        let identity: Identity = serde_json::from_str(raw)?;
        if identity.role.is_empty() {
            return Err(serde::de::Error::custom("empty role"));
        }
        Ok(identity)
    }

    pub fn to_persisted(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_roundtrips_through_strings() {
        assert_eq!(Role::from("donator"), Role::Donator);
        assert_eq!(Role::from("beneficiary"), Role::Beneficiary);
        assert_eq!(Role::from("admin"), Role::Unknown("admin".into()));
        assert_eq!(String::from(Role::Beneficiary), "beneficiary");
        assert_eq!(Role::Unknown("admin".into()).to_string(), "admin");
    }

    #[test]
    fn test_identity_serializes_flat() {
        let mut profile = Map::new();
        profile.insert("email".into(), json!("d1@example.org"));
        profile.insert("role".into(), json!("beneficiary"));
        let identity = Identity::with_profile(Role::Donator, profile);

        let value: Value = serde_json::from_str(&identity.to_persisted().unwrap()).unwrap();
        assert_eq!(value, json!({"role": "donator", "email": "d1@example.org"}));
    }

    #[test]
    fn test_from_persisted_rejects_missing_or_empty_role() {
        assert!(Identity::from_persisted(r#"{"email":"x"}"#).is_err());
        assert!(Identity::from_persisted(r#"{"role":""}"#).is_err());
        assert!(Identity::from_persisted(r#"{"role":null}"#).is_err());
        assert!(Identity::from_persisted(r#"{"role":7}"#).is_err());
        assert!(Identity::from_persisted("null").is_err());
        assert!(Identity::from_persisted("{not json").is_err());

        let identity = Identity::from_persisted(r#"{"role":"beneficiary","name":"B"}"#).unwrap();
        assert_eq!(identity.role, Role::Beneficiary);
        assert_eq!(identity.get("name"), Some(&json!("B")));
        assert!(identity.get("role").is_none());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("secret-token");
        assert_eq!(format!("{credential:?}"), "Credential(***)");
        assert_eq!(credential.as_str(), "secret-token");
    }
}
