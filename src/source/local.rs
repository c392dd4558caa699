//! In-memory card source.

use std::sync::Arc;

use async_trait::async_trait;

use crate::cards::{CardCatalog, CatalogStats, VariantSet};
use crate::core::{CardNumber, LookupError};

use super::CardSource;

/// Serves lookups straight from a loaded catalog.
#[derive(Clone, Debug)]
pub struct CatalogSource {
    catalog: Arc<CardCatalog>,
}

impl CatalogSource {
    pub fn new(catalog: impl Into<Arc<CardCatalog>>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }
}

#[async_trait]
impl CardSource for CatalogSource {
    async fn variants(&self, number: CardNumber) -> Result<VariantSet, LookupError> {
        Ok(self.catalog.variants(number).clone())
    }

    async fn stats(&self) -> Result<CatalogStats, LookupError> {
        Ok(self.catalog.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRecord;

    #[tokio::test]
    async fn test_catalog_source_lookup() {
        let five = CardNumber::new(5).unwrap();
        let mut catalog = CardCatalog::new();
        catalog.insert(CardRecord::new(five, "005.png"));

        let source = CatalogSource::new(catalog);
        assert_eq!(source.variants(five).await.unwrap().len(), 1);
        assert!(source
            .variants(CardNumber::new(6).unwrap())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(source.stats().await.unwrap().total, 1);
    }
}
