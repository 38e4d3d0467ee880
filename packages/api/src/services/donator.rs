use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Aliment, Donation};
use crate::transport::Transport;

/// Aliment and donation management for donators.
pub struct DonatorService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> DonatorService<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list_aliments(&self) -> Result<Vec<Aliment>, ApiError> {
        self.client.get("/aliments").await
    }

    pub async fn get_aliment(&self, id: &str) -> Result<Aliment, ApiError> {
        self.client.get(&format!("/aliments/{id}")).await
    }

    /// Returns the backend reply verbatim.
    pub async fn create_aliment(&self, aliment: &Aliment) -> Result<Value, ApiError> {
        self.client.post("/aliments", aliment).await
    }

    pub async fn delete_aliment(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/aliments/{id}")).await
    }

    pub async fn create_donation(&self, donation: &Donation) -> Result<Value, ApiError> {
        self.client.post("/donation", donation).await
    }
}
