use async_trait::async_trait;

use super::http::{MarketApi, RemoteError};
use crate::models::{ProductRecord, ValueList};

// ============================================================================
// Catalog Service
// ============================================================================

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every listed product with its current price and stock. Stock figures
    /// feed the local quantity guard before a cart mutation goes out.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, RemoteError>;
}

#[async_trait]
impl CatalogService for MarketApi {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, RemoteError> {
        let response = self
            .client
            .get(self.url("/products"))
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        let response = Self::ensure_success(response).await?;
        let listing = response
            .json::<ValueList<ProductRecord>>()
            .await
            .map_err(|error| RemoteError::Decode(error.to_string()))?;
        Ok(listing.into_vec())
    }
}
