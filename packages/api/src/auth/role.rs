//! # Role inference
//!
//! The backend does not report a role at login, so the client discovers it
//! by probing role-gated endpoints with the fresh token and reading the
//! status codes. All of that is contained in [`infer_role`].
//!
//! Probes run one at a time, donor endpoint first. A 401/403 means "not this
//! role"; any other failure aborts inference with
//! [`AuthError::ProbeFailed`] rather than guessing.

use reqwest::Method;
use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::AuthError;
use crate::models::Role;
use crate::settings::Endpoints;
use crate::transport::Transport;

/// How many role endpoints to probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStrategy {
    /// Stop at the first granted probe.
    #[default]
    FirstMatch,
    /// Probe both endpoints and reject accounts that pass both.
    Exhaustive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Granted,
    Denied,
}

async fn probe<T: Transport>(client: &ApiClient<T>, endpoint: &str) -> Result<Probe, AuthError> {
    match client.send_raw(Method::GET, endpoint, None).await {
        Ok(_) => {
            tracing::debug!("Role probe {} granted", endpoint);
            Ok(Probe::Granted)
        }
        Err(e) if e.is_auth_denied() => {
            tracing::debug!("Role probe {} denied: {}", endpoint, e);
            Ok(Probe::Denied)
        }
        Err(source) => {
            tracing::warn!("Role probe {} failed: {}", endpoint, source);
            Err(AuthError::ProbeFailed {
                endpoint: endpoint.to_string(),
                source,
            })
        }
    }
}

/// Determine the role of the account whose token is currently attached.
pub async fn infer_role<T: Transport>(
    client: &ApiClient<T>,
    endpoints: &Endpoints,
    strategy: ProbeStrategy,
) -> Result<Role, AuthError> {
    let donator = probe(client, &endpoints.donator_probe).await?;
    if donator == Probe::Granted && strategy == ProbeStrategy::FirstMatch {
        return Ok(Role::Donator);
    }

    let beneficiary = probe(client, &endpoints.beneficiary_probe).await?;
    match (donator, beneficiary) {
        (Probe::Granted, Probe::Granted) => {
            tracing::warn!("Account passed both role probes; backend is not separating roles");
            Err(AuthError::AmbiguousRole)
        }
        (Probe::Granted, Probe::Denied) => Ok(Role::Donator),
        (Probe::Denied, Probe::Granted) => Ok(Role::Beneficiary),
        (Probe::Denied, Probe::Denied) => Err(AuthError::RoleUndetermined),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use store::MemoryStore;

    use crate::navigation::NavigationHistory;
    use crate::session::Session;
    use crate::testing::ScriptedTransport;

    const DONATOR: &str = "/aliments";
    const BENEFICIARY: &str = "/donation/filter/7";

    fn client(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport> {
        let session = Session::new(
            Arc::new(MemoryStore::new()),
            Arc::new(NavigationHistory::new()),
        );
        ApiClient::new(transport.clone(), session)
    }

    async fn infer(
        donator: u16,
        beneficiary: u16,
        strategy: ProbeStrategy,
    ) -> (Result<Role, AuthError>, ScriptedTransport) {
        let transport = ScriptedTransport::new()
            .respond(Method::GET, DONATOR, donator, "")
            .respond(Method::GET, BENEFICIARY, beneficiary, "");
        let result = infer_role(&client(&transport), &Endpoints::default(), strategy).await;
        (result, transport)
    }

    #[tokio::test]
    async fn test_first_match_outcomes() {
        let (role, transport) = infer(200, 200, ProbeStrategy::FirstMatch).await;
        assert_eq!(role.unwrap(), Role::Donator);
        assert_eq!(transport.calls(BENEFICIARY), 0);

        let (role, _) = infer(403, 200, ProbeStrategy::FirstMatch).await;
        assert_eq!(role.unwrap(), Role::Beneficiary);

        let (role, _) = infer(401, 403, ProbeStrategy::FirstMatch).await;
        assert!(matches!(role, Err(AuthError::RoleUndetermined)));

        let (role, _) = infer(403, 502, ProbeStrategy::FirstMatch).await;
        assert!(
            matches!(role, Err(AuthError::ProbeFailed { ref endpoint, .. }) if endpoint == BENEFICIARY)
        );

        let (role, transport) = infer(500, 200, ProbeStrategy::FirstMatch).await;
        assert!(
            matches!(role, Err(AuthError::ProbeFailed { ref endpoint, .. }) if endpoint == DONATOR)
        );
        assert_eq!(transport.calls(BENEFICIARY), 0);
    }

    #[tokio::test]
    async fn test_exhaustive_outcomes() {
        let (role, transport) = infer(200, 200, ProbeStrategy::Exhaustive).await;
        assert!(matches!(role, Err(AuthError::AmbiguousRole)));
        assert_eq!(transport.calls(BENEFICIARY), 1);

        let (role, _) = infer(200, 403, ProbeStrategy::Exhaustive).await;
        assert_eq!(role.unwrap(), Role::Donator);

        let (role, _) = infer(401, 200, ProbeStrategy::Exhaustive).await;
        assert_eq!(role.unwrap(), Role::Beneficiary);

        let (role, _) = infer(200, 500, ProbeStrategy::Exhaustive).await;
        assert!(matches!(role, Err(AuthError::ProbeFailed { .. })));
    }

    #[tokio::test]
    async fn test_probes_are_sequential_donator_first() {
        let (_, transport) = infer(403, 200, ProbeStrategy::FirstMatch).await;
        let paths: Vec<_> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec![DONATOR, BENEFICIARY]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_probe_failure() {
        let transport = ScriptedTransport::new().fail(Method::GET, DONATOR, "connection reset");
        let result = infer_role(
            &client(&transport),
            &Endpoints::default(),
            ProbeStrategy::FirstMatch,
        )
        .await;
        assert!(matches!(result, Err(AuthError::ProbeFailed { .. })));
        assert_eq!(transport.calls(BENEFICIARY), 0);
    }
}
