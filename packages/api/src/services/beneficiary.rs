use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Donation, DonatorInfo};
use crate::transport::Transport;

/// Donation browsing for beneficiaries.
pub struct BeneficiaryService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> BeneficiaryService<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Donations from the last `days` days.
    pub async fn filter_donations(&self, days: u32) -> Result<Vec<Donation>, ApiError> {
        self.client.get(&format!("/donation/filter/{days}")).await
    }

    pub async fn donator_for_donation(&self, donation_id: &str) -> Result<DonatorInfo, ApiError> {
        self.client
            .get(&format!("/donation/{donation_id}/donator"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;
    use store::MemoryStore;

    use crate::error::ApiError;
    use crate::navigation::NavigationHistory;
    use crate::session::Session;
    use crate::testing::ScriptedTransport;
    use crate::ApiClient;

    #[tokio::test]
    async fn test_filter_and_donator_lookup() {
        let transport = ScriptedTransport::new()
            .respond(Method::GET, "/donation/filter/30", 200, r#"[{"id":5,"aliment":"rice"}]"#)
            .respond(Method::GET, "/donation/5/donator", 200, r#"{"name":"Donor One","phone":"555"}"#)
            .respond(Method::GET, "/donation/6/donator", 404, r#"{"message":"no such donation"}"#);
        let session = Session::new(
            Arc::new(MemoryStore::new()),
            Arc::new(NavigationHistory::new()),
        );
        let client = ApiClient::new(transport, session);
        let beneficiary = client.beneficiary();

        let donations = beneficiary.filter_donations(30).await.unwrap();
        assert_eq!(donations.len(), 1);
        assert_eq!(donations[0].id().as_deref(), Some("5"));

        let donator = beneficiary.donator_for_donation("5").await.unwrap();
        assert_eq!(donator.get("name"), Some(&json!("Donor One")));

        let err = beneficiary.donator_for_donation("6").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { ref message, .. } if message == "no such donation"));
    }
}
