//! Backend records. The backend's schemas are not pinned down, so records
//! keep every field as JSON and only expose what the client needs by name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object returned by (or sent to) the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

/// A donatable food item.
pub type Aliment = Record;
pub type Donation = Record;
/// Contact details of the donator behind a donation.
pub type DonatorInfo = Record;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a field.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The record id, whether the backend sent it as a string or a number.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
