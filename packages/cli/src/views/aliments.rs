use anyhow::{Context, Result};
use api::{ApiClient, Record, Transport};

use super::{parse_payload, print_json};

pub async fn list<T: Transport>(client: &ApiClient<T>) -> Result<()> {
    let aliments = client
        .donator()
        .list_aliments()
        .await
        .context("Failed to list aliments")?;
    if aliments.is_empty() {
        println!("No aliments");
        return Ok(());
    }
    print_json(&aliments)
}

pub async fn show<T: Transport>(client: &ApiClient<T>, id: &str) -> Result<()> {
    let aliment = client
        .donator()
        .get_aliment(id)
        .await
        .with_context(|| format!("Failed to fetch aliment {id}"))?;
    print_json(&aliment)
}

pub async fn add<T: Transport>(client: &ApiClient<T>, payload: &str) -> Result<()> {
    let aliment: Record = serde_json::from_value(parse_payload(payload)?)
        .context("Aliment payload must be a JSON object")?;
    let reply = client
        .donator()
        .create_aliment(&aliment)
        .await
        .context("Failed to create aliment")?;
    print_json(&reply)
}

pub async fn delete<T: Transport>(client: &ApiClient<T>, id: &str) -> Result<()> {
    client
        .donator()
        .delete_aliment(id)
        .await
        .with_context(|| format!("Failed to delete aliment {id}"))?;
    println!("Deleted aliment {id}");
    Ok(())
}
