//! Where lookups go.
//!
//! The keypad session only needs `CardSource`: an async
//! "variants of number n" plus a readiness check. Two bindings exist:
//!
//! - `CatalogSource`: an in-memory `CardCatalog` (static/local variant)
//! - `HttpSource`: a running card server, over HTTP (`remote` feature)

mod local;
#[cfg(feature = "remote")]
mod http;

pub use local::CatalogSource;
#[cfg(feature = "remote")]
pub use http::HttpSource;

use async_trait::async_trait;

use crate::cards::{CatalogStats, VariantSet};
use crate::core::{CardNumber, LookupError};

/// Asynchronous card lookup.
#[async_trait]
pub trait CardSource: Send + Sync {
    /// All variants of `number`; empty when there are none.
    async fn variants(&self, number: CardNumber) -> Result<VariantSet, LookupError>;

    /// Catalog size. Fails when the source is not usable.
    async fn stats(&self) -> Result<CatalogStats, LookupError>;
}
