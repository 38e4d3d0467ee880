//! Terminal views. Each one runs a single operation and prints the result.

use anyhow::{Context, Result};
use api::{Session, SessionStore, Transport};
use serde_json::{json, Value};

pub mod aliments;
pub mod donations;

#[derive(Debug, Clone, Copy)]
pub enum Account {
    Donator,
    Beneficiary,
}

pub async fn login<T: Transport>(
    store: &SessionStore<T>,
    username: &str,
    password: &str,
) -> Result<()> {
    let credentials = json!({ "username": username, "password": password });
    let landing = store.login(&credentials).await.context("Login failed")?;

    if let Some(role) = store.session().role() {
        println!("Signed in as {role}");
    }
    // The landing page still goes through the guard like any navigation.
    let auth = ui::AuthState::from_session(store.session());
    println!("{}", ui::resolve_route(&auth, ui::Route::from(landing)));
    Ok(())
}

pub fn status(session: &Session) {
    let snapshot = session.snapshot();
    if !snapshot.is_authenticated() {
        println!("Not signed in");
        return;
    }
    if let Some(identity) = snapshot.identity {
        println!("Signed in as {}", identity.role);
        for (field, value) in &identity.profile {
            println!("  {field}: {value}");
        }
    }
}

pub async fn register<T: Transport>(
    store: &SessionStore<T>,
    account: Account,
    payload: &str,
) -> Result<()> {
    let data = parse_payload(payload)?;
    let reply = match account {
        Account::Donator => store.register_donator(&data).await,
        Account::Beneficiary => store.register_beneficiary(&data).await,
    }
    .context("Registration failed")?;
    print_json(&reply)
}

pub(crate) fn parse_payload(payload: &str) -> Result<Value> {
    serde_json::from_str(payload).context("Payload is not valid JSON")
}

pub(crate) fn print_json<V: serde::Serialize + ?Sized>(value: &V) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
