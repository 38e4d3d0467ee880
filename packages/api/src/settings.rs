//! # Client settings
//!
//! Layered the usual way: built-in defaults, then an optional TOML file
//! (`config.toml` unless a path is given), then environment variables such as
//! `DONATIONS_API__BASE_URL` or `DONATIONS_ENDPOINTS__BENEFICIARY_PROBE`.
//! A `.env` file is loaded into the environment first.
//!
//! The backend contract has drifted between deployments (the beneficiary
//! probe and the registration routes in particular), so every path the
//! session flow depends on lives in [`Endpoints`] rather than in code.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::auth::ProbeStrategy;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "DONATIONS";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    /// Per-request timeout. Unset means the transport default (none).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            request_timeout_secs: None,
        }
    }
}

/// Backend paths used by the session flow.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Endpoints {
    pub login: String,
    pub account: String,
    /// Donor-capability probe.
    pub donator_probe: String,
    /// Beneficiary-capability probe. Also seen as `/beneficiary/donation/filter/7`.
    pub beneficiary_probe: String,
    /// Also seen as `/account/register/donator`.
    pub register_donator: String,
    /// Also seen as `/account/register/beneficiary`.
    pub register_beneficiary: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/login".into(),
            account: "/account".into(),
            donator_probe: "/aliments".into(),
            beneficiary_probe: "/donation/filter/7".into(),
            register_donator: "/register-donator".into(),
            register_beneficiary: "/register-beneficiary".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SessionSettings {
    #[serde(default)]
    pub probe_strategy: ProbeStrategy,
    /// Where the desktop client keeps its persisted session.
    /// Defaults to the platform data directory.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Settings {
    pub api: ApiSettings,
    pub endpoints: Endpoints,
    #[serde(default)]
    pub session: SessionSettings,
}

impl Settings {
    /// Load settings from `config.toml` (if present) and the environment.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load settings, reading the TOML file at `path` instead of the default.
    /// A missing default file is fine; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Endpoints::default();
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE)
                .format(FileFormat::Toml)
                .required(false),
        };

        let config = Config::builder()
            .set_default("api.base_url", ApiSettings::default().base_url)?
            .set_default("endpoints.login", defaults.login)?
            .set_default("endpoints.account", defaults.account)?
            .set_default("endpoints.donator_probe", defaults.donator_probe)?
            .set_default("endpoints.beneficiary_probe", defaults.beneficiary_probe)?
            .set_default("endpoints.register_donator", defaults.register_donator)?
            .set_default("endpoints.register_beneficiary", defaults.register_beneficiary)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_settings_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://backend:9000"
request_timeout_secs = 15

[endpoints]
register_donator = "/account/register/donator"

[session]
probe_strategy = "exhaustive"
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.api.base_url, "http://backend:9000");
        assert_eq!(settings.api.request_timeout_secs, Some(15));
        assert_eq!(settings.endpoints.register_donator, "/account/register/donator");
        // Untouched keys keep their defaults
        assert_eq!(settings.endpoints.login, "/login");
        assert_eq!(settings.endpoints.donator_probe, "/aliments");
        assert_eq!(settings.session.probe_strategy, ProbeStrategy::Exhaustive);
        assert!(settings.session.storage_dir.is_none());
    }

    #[test]
    fn test_settings_from_env() {
        std::env::set_var(
            "DONATIONS_ENDPOINTS__BENEFICIARY_PROBE",
            "/beneficiary/donation/filter/7",
        );
        let settings = Settings::new().unwrap();
        std::env::remove_var("DONATIONS_ENDPOINTS__BENEFICIARY_PROBE");

        assert_eq!(
            settings.endpoints.beneficiary_probe,
            "/beneficiary/donation/filter/7"
        );
        assert_eq!(settings.session.probe_strategy, ProbeStrategy::FirstMatch);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load(Some(&missing)).is_err());
    }
}
