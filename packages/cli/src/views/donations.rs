use anyhow::{Context, Result};
use api::{ApiClient, Record, Transport};

use super::{parse_payload, print_json};

pub async fn donate<T: Transport>(client: &ApiClient<T>, payload: &str) -> Result<()> {
    let donation: Record = serde_json::from_value(parse_payload(payload)?)
        .context("Donation payload must be a JSON object")?;
    let reply = client
        .donator()
        .create_donation(&donation)
        .await
        .context("Failed to create donation")?;
    print_json(&reply)
}

pub async fn list<T: Transport>(client: &ApiClient<T>, days: u32) -> Result<()> {
    let donations = client
        .beneficiary()
        .filter_donations(days)
        .await
        .with_context(|| format!("Failed to list donations from the last {days} days"))?;
    if donations.is_empty() {
        println!("No donations in the last {days} days");
        return Ok(());
    }
    print_json(&donations)
}

pub async fn donator<T: Transport>(client: &ApiClient<T>, id: &str) -> Result<()> {
    let info = client
        .beneficiary()
        .donator_for_donation(id)
        .await
        .with_context(|| format!("Failed to fetch donator for donation {id}"))?;
    print_json(&info)
}
