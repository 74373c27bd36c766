//! myGameDatabase
//!
//! A menu-driven catalog for a personal video game collection. Games can be
//! added, removed and searched by name, platform or ESRB rating; everything is
//! kept in a local SQLite file that is committed when the session ends.

mod session;

use anyhow::{Context, Result};
use std::io;
use tracing::{error, info};

use mygamedb_config::CatalogConfig;
use mygamedb_library::CatalogStore;

use crate::session::Session;

fn main() -> Result<()> {
    setup_logging();

    let config = CatalogConfig::load_default().context("Failed to load configuration")?;

    let store = CatalogStore::open_with(&config.store).with_context(|| {
        format!(
            "Failed to open game catalog {}",
            config.store.path.display()
        )
    })?;

    info!(
        "myGameDatabase starting with {} (table {})",
        config.store.path.display(),
        store.table()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(store, config.messages, stdin.lock(), stdout.lock());

    // Keep what the session already did even if the dialogue stops on an error
    let outcome = session.run();
    if let Err(e) = &outcome {
        error!("Session ended early: {:#}", e);
    }
    session
        .finish()
        .context("Failed to save the game catalog")?;
    outcome?;

    info!("myGameDatabase exiting");
    Ok(())
}

/// Log to stderr so records never interleave with the menus on stdout
fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(io::stderr),
        )
        .init();
}
