//! Card source backed by a running card server.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::cards::{CatalogStats, VariantSet};
use crate::core::{CardNumber, LookupError};

use super::CardSource;

/// Looks cards up with `GET /api/cards/{number}`.
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// `base_url` is the server root, e.g. `http://localhost:5173`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, LookupError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "card source request");
        self.client.get(&url).send().await.map_err(transport)
    }
}

#[async_trait]
impl CardSource for HttpSource {
    async fn variants(&self, number: CardNumber) -> Result<VariantSet, LookupError> {
        let response = self.get(&format!("/api/cards/{}", number.padded())).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(VariantSet::new()),
            StatusCode::BAD_REQUEST => Err(LookupError::Rejected(number)),
            status if status.is_success() => response.json().await.map_err(transport),
            status => Err(LookupError::Status(status.as_u16())),
        }
    }

    async fn stats(&self) -> Result<CatalogStats, LookupError> {
        let response = self.get("/api/health").await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        response.json().await.map_err(transport)
    }
}

fn transport(e: reqwest::Error) -> LookupError {
    LookupError::Transport(e.to_string())
}
