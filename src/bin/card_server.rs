//! card-server: HTTP API and static frontend for the card catalog.
//!
//! Reads config from env vars (and `.env`):
//!   PORT       listen port (default: 5173)
//!   BIND_ADDR  listen address (default: 0.0.0.0)
//!   PUBLIC_DIR static frontend (default: docs)
//!   CARDS_DIR  card images, relative to PUBLIC_DIR (default: cards)
//!   CARDS_CSV  catalog CSV (default: data/cards.csv)

use card_keypad::core::ServerConfig;
use card_keypad::server::{build_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,card_keypad=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        csv = %config.cards_csv.display(),
        public = %config.public_dir.display(),
        cards = %config.cards_dir.display(),
        "starting card server"
    );

    // Without a catalog there is nothing to serve
    let state = AppState::load(config.cards_csv.clone())?;
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
