//! Terminal front end for the donation client.
//!
//! Each invocation restores the persisted session, runs one command, and
//! leaves the session on disk for the next run.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use api::{ApiClient, Destination, HttpTransport, Navigator, Session, SessionStore, Settings};
use clap::{Parser, Subcommand};
use store::FileStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod views;

/// Donation client
#[derive(Parser, Debug)]
#[command(name = "donations")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML settings file (defaults to ./config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Session ===
    /// Sign in and infer the account role
    Login { username: String, password: String },

    /// Sign out and forget the persisted session
    Logout,

    /// Show the current session
    Status,

    /// Resolve a path through the route guard
    Open { path: String },

    /// Register a donator account (JSON payload)
    RegisterDonator { payload: String },

    /// Register a beneficiary account (JSON payload)
    RegisterBeneficiary { payload: String },

    // === Donator ===
    /// List aliments
    #[command(alias = "ls")]
    Aliments,

    /// Show one aliment
    Aliment { id: String },

    /// Create an aliment (JSON payload)
    AddAliment { payload: String },

    /// Delete an aliment
    DeleteAliment { id: String },

    /// Create a donation (JSON payload)
    Donate { payload: String },

    // === Beneficiary ===
    /// List donations from the last N days
    Donations {
        #[arg(default_value_t = 7)]
        days: u32,
    },

    /// Show the donator behind a donation
    DonationDonator { id: String },
}

/// Prints every navigation the session requests.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, destination: Destination) {
        println!("→ {}", ui::Route::from(destination));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    tracing::debug!("Using backend {}", settings.api.base_url);

    let storage_dir = settings.session.storage_dir.clone().unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("donations")
    });
    let session = Session::new(
        Arc::new(FileStore::new(storage_dir)),
        Arc::new(TerminalNavigator),
    );
    session.restore();

    let transport = HttpTransport::new(&settings.api).context("Failed to build HTTP client")?;
    let client = ApiClient::new(transport, session);
    let store = SessionStore::new(client, settings.endpoints)
        .with_probe_strategy(settings.session.probe_strategy);

    match cli.command {
        Commands::Login { username, password } => {
            views::login(&store, &username, &password).await
        }
        Commands::Logout => {
            store.logout();
            Ok(())
        }
        Commands::Status => {
            views::status(store.session());
            Ok(())
        }
        Commands::Open { path } => {
            let auth = ui::AuthState::from_session(store.session());
            println!("{}", ui::resolve(&auth, &path));
            Ok(())
        }
        Commands::RegisterDonator { payload } => {
            views::register(&store, views::Account::Donator, &payload).await
        }
        Commands::RegisterBeneficiary { payload } => {
            views::register(&store, views::Account::Beneficiary, &payload).await
        }
        Commands::Aliments => views::aliments::list(store.client()).await,
        Commands::Aliment { id } => views::aliments::show(store.client(), &id).await,
        Commands::AddAliment { payload } => views::aliments::add(store.client(), &payload).await,
        Commands::DeleteAliment { id } => views::aliments::delete(store.client(), &id).await,
        Commands::Donate { payload } => views::donations::donate(store.client(), &payload).await,
        Commands::Donations { days } => views::donations::list(store.client(), days).await,
        Commands::DonationDonator { id } => views::donations::donator(store.client(), &id).await,
    }
}
