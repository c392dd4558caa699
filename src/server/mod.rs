//! HTTP API and static file server.
//!
//! ## Routes
//!
//! - `GET /api/health`: `{ok, numbers, total}`
//! - `POST /api/reload`: re-read the CSV; the old catalog stays on failure
//! - `GET /api/cards/{number}`: every variant of a number
//! - `GET /api/card/{number}?filename=`: a single variant
//! - `/cards/*`: card images from `ServerConfig::cards_dir`
//! - anything else: static files from `ServerConfig::public_dir`

mod error;
mod routes;

pub use error::ApiError;
pub use routes::{CardQuery, HealthBody};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::cards::{CardCatalog, CatalogStats};
use crate::core::{CatalogError, ServerConfig};

/// Shared handler state: the live catalog and where it was loaded from.
#[derive(Clone, Debug)]
pub struct AppState {
    catalog: Arc<RwLock<Arc<CardCatalog>>>,
    cards_csv: PathBuf,
}

impl AppState {
    pub fn new(catalog: CardCatalog, cards_csv: impl Into<PathBuf>) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            cards_csv: cards_csv.into(),
        }
    }

    /// Load the catalog from `cards_csv`.
    pub fn load(cards_csv: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let cards_csv = cards_csv.into();
        let catalog = CardCatalog::from_path(&cards_csv)?;
        Ok(Self::new(catalog, cards_csv))
    }

    /// Snapshot of the current catalog.
    pub async fn catalog(&self) -> Arc<CardCatalog> {
        Arc::clone(&*self.catalog.read().await)
    }

    #[must_use]
    pub fn cards_csv(&self) -> &Path {
        &self.cards_csv
    }

    /// Re-read the CSV and swap it in. On error the current catalog is kept.
    pub async fn reload(&self) -> Result<CatalogStats, CatalogError> {
        let fresh = CardCatalog::from_path(&self.cards_csv)?;
        let stats = fresh.stats();
        *self.catalog.write().await = Arc::new(fresh);
        Ok(stats)
    }
}

/// Build the application router.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    for dir in [&config.public_dir, &config.cards_dir] {
        if !dir.is_dir() {
            warn!(path = %dir.display(), "static directory does not exist");
        }
    }

    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/reload", post(routes::reload))
        .route("/api/cards/:number", get(routes::cards))
        .route("/api/card/:number", get(routes::card))
        .nest_service("/cards", ServeDir::new(&config.cards_dir))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
