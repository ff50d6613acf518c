//! ScootEase - Scooter Rental Application Core
//!
//! Main entry point: opens local storage, restores the session, and
//! reports startup state.

use anyhow::Context;
use scootease::app::{App, Screen};
use scootease::session::SessionStore;
use scootease::storage::{self, Database};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ScootEase v{}", env!("CARGO_PKG_VERSION"));

    let config = storage::load_config().context("Failed to load configuration")?;

    let db = Database::open(&config.database_path()).context("Failed to open database")?;
    let session = SessionStore::open(&config.data_dir);
    let app = App::new(db, session)?;
    tracing::info!("Catalog ready with {} bikes", app.state().catalog.len());

    match app.state().current_screen {
        Screen::Main => {
            let username = app.session().user_name().unwrap_or_else(|| "?".to_string());
            tracing::info!(
                "Restored session for {} with {} bookings",
                username,
                app.state().bookings.len()
            );
        }
        _ => tracing::info!("No saved session, starting at the auth screen"),
    }

    Ok(())
}
