//! The application's route table.

use api::{Destination, Role};
use dioxus::prelude::*;

use crate::layout::Guarded;
use crate::views::{
    BeneficiaryDashboard, DonatorAliments, DonatorDashboard, Donations, Login, NotFound,
    RegisterBeneficiary, RegisterDonator,
};

/// Every page of the client. Authenticated pages keep their query string so
/// a login redirect can send the user back to exactly where they were.
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[redirect("/", || Route::RegisterDonator {})]
    #[layout(Guarded)]
        #[route("/login?:redirect")]
        Login { redirect: String },
        #[route("/register-donator")]
        RegisterDonator {},
        #[route("/register-beneficiary")]
        RegisterBeneficiary {},
        #[route("/donations?:..query")]
        Donations { query: String },
        #[route("/donator/dashboard?:..query")]
        DonatorDashboard { query: String },
        #[route("/donator/aliments?:..query")]
        DonatorAliments { query: String },
        #[route("/beneficiary/dashboard?:..query")]
        BeneficiaryDashboard { query: String },
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// The login page without a return path.
    pub fn login() -> Self {
        Route::Login {
            redirect: String::new(),
        }
    }

    /// Parse a requested path. Anything unmatched is [`Route::NotFound`].
    pub fn from_path(path: &str) -> Self {
        path.parse().unwrap_or_else(|_| Self::not_found(path))
    }

    pub fn not_found(path: &str) -> Self {
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        Route::NotFound {
            segments: path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Path plus query string, as typed into the address bar.
    pub fn full_path(&self) -> String {
        let path = self.to_string();
        path.trim_end_matches('?').to_string()
    }

    /// The dashboard owned by `role`, if it has one.
    pub fn dashboard_for(role: &Role) -> Option<Self> {
        Destination::dashboard_for(role).map(Route::from)
    }

    pub fn landing_for(role: &Role) -> Self {
        Route::from(Destination::landing_for(role))
    }
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Login => Route::login(),
            Destination::Donations => Route::Donations {
                query: String::new(),
            },
            Destination::DonatorDashboard => Route::DonatorDashboard {
                query: String::new(),
            },
            Destination::BeneficiaryDashboard => Route::BeneficiaryDashboard {
                query: String::new(),
            },
        }
    }
}
