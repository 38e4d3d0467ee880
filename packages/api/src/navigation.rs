//! # Navigation intents
//!
//! The session flow never knows about URLs. It pushes a [`Destination`] to an
//! injected [`Navigator`]: the landing page after login, the login page after
//! logout or an expired session. Front ends map destinations onto their own
//! route table.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    Donations,
    DonatorDashboard,
    BeneficiaryDashboard,
}

impl Destination {
    /// The dashboard owned by `role`, if it has one.
    pub fn dashboard_for(role: &Role) -> Option<Self> {
        match role {
            Role::Donator => Some(Destination::DonatorDashboard),
            Role::Beneficiary => Some(Destination::BeneficiaryDashboard),
            Role::Unknown(_) => None,
        }
    }

    /// Where an authenticated user with `role` lands: their dashboard, or the
    /// generic donations page.
    pub fn landing_for(role: &Role) -> Self {
        Self::dashboard_for(role).unwrap_or(Destination::Donations)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Destination::Login => "login",
            Destination::Donations => "donations",
            Destination::DonatorDashboard => "donator dashboard",
            Destination::BeneficiaryDashboard => "beneficiary dashboard",
        };
        f.write_str(name)
    }
}

/// Receives navigation requests from the session layer.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);
}

/// Navigator that records every request, newest last.
#[derive(Clone, Debug, Default)]
pub struct NavigationHistory {
    entries: Arc<Mutex<Vec<Destination>>>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Destination> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent navigation, if any.
    pub fn current(&self) -> Option<Destination> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    /// Drain pending requests, oldest first.
    pub fn take(&self) -> Vec<Destination> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Navigator for NavigationHistory {
    fn navigate(&self, destination: Destination) {
        tracing::debug!("Navigating to {}", destination);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_for_role() {
        assert_eq!(Destination::landing_for(&Role::Donator), Destination::DonatorDashboard);
        assert_eq!(
            Destination::landing_for(&Role::Beneficiary),
            Destination::BeneficiaryDashboard
        );
        assert_eq!(
            Destination::landing_for(&Role::Unknown("admin".into())),
            Destination::Donations
        );
        assert_eq!(Destination::dashboard_for(&Role::Unknown("admin".into())), None);
    }

    #[test]
    fn test_history_records_in_order() {
        let history = NavigationHistory::new();
        assert!(history.current().is_none());
        history.navigate(Destination::DonatorDashboard);
        history.navigate(Destination::Login);
        assert_eq!(
            history.entries(),
            vec![Destination::DonatorDashboard, Destination::Login]
        );
        assert_eq!(history.current(), Some(Destination::Login));

        assert_eq!(history.take().len(), 2);
        assert!(history.entries().is_empty());
    }
}
