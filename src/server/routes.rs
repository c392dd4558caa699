//! API handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::{CardRecord, CatalogStats, VariantSet};
use crate::core::CardNumber;

use super::error::ApiError;
use super::AppState;

/// Body of `/api/health` and `/api/reload`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBody {
    pub ok: bool,
    #[serde(flatten)]
    pub stats: CatalogStats,
}

#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    pub filename: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let stats = state.catalog().await.stats();
    Json(HealthBody { ok: true, stats })
}

pub async fn reload(State(state): State<AppState>) -> Result<Json<HealthBody>, ApiError> {
    match state.reload().await {
        Ok(stats) => {
            info!(numbers = stats.numbers, total = stats.total, "catalog reloaded");
            Ok(Json(HealthBody { ok: true, stats }))
        }
        Err(e) => {
            warn!(error = %e, "catalog reload failed, keeping previous data");
            Err(e.into())
        }
    }
}

/// All variants of a number.
pub async fn cards(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<VariantSet>, ApiError> {
    let number = CardNumber::parse_entry(&raw)?;
    let catalog = state.catalog().await;
    let variants = catalog.variants(number);
    debug!(%number, count = variants.len(), "cards lookup");

    if variants.is_empty() {
        return Err(ApiError::NotFound(number));
    }
    Ok(Json(variants.clone()))
}

/// One variant: the one matching `?filename=` by basename, else the first.
pub async fn card(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Query(query): Query<CardQuery>,
) -> Result<Json<CardRecord>, ApiError> {
    let number = CardNumber::parse_entry(&raw)?;
    let catalog = state.catalog().await;
    let variants = catalog.variants(number);

    let wanted = query.filename.filter(|f| !f.trim().is_empty());
    let record = match wanted {
        Some(filename) => variants
            .find_by_filename(&filename)
            .ok_or(ApiError::NoSuchVariant { number, filename })?,
        None => variants.first().ok_or(ApiError::NotFound(number))?,
    };
    Ok(Json(record.clone()))
}
