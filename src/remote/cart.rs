use async_trait::async_trait;

use super::http::{MarketApi, RemoteError};
use crate::domain::cart::ProductId;
use crate::models::CartPayload;

// ============================================================================
// Cart Service
// ============================================================================
//
// Remote operations on the session cart. The backend owns cart contents;
// this trait only moves them. Mutation endpoints return the usual
// success/error envelope but no useful body, so callers re-fetch the cart
// afterwards to learn the authoritative state.
//
// ============================================================================

#[async_trait]
pub trait CartService: Send + Sync {
    /// Fetch the full cart for the current session.
    async fn fetch_cart(&self) -> Result<CartPayload, RemoteError>;

    /// Add `quantity` units of a product, creating or growing its line.
    async fn add_item(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError>;

    /// Set the absolute quantity of an existing line.
    async fn update_item(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError>;

    /// Delete a product's line entirely.
    async fn remove_item(&self, product_id: ProductId) -> Result<(), RemoteError>;

    /// Drop every line in the cart.
    async fn clear(&self) -> Result<(), RemoteError>;
}

#[async_trait]
impl CartService for MarketApi {
    async fn fetch_cart(&self) -> Result<CartPayload, RemoteError> {
        let response = self
            .client
            .get(self.url("/cart"))
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        let response = Self::ensure_success(response).await?;
        response
            .json::<CartPayload>()
            .await
            .map_err(|error| RemoteError::Decode(error.to_string()))
    }

    async fn add_item(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.url("/cart/add"))
            .query(&[
                ("productId", product_id.to_string()),
                ("quantity", quantity.to_string()),
            ])
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn update_item(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.url("/cart/update"))
            .query(&[
                ("productId", product_id.to_string()),
                ("quantity", quantity.to_string()),
            ])
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn remove_item(&self, product_id: ProductId) -> Result<(), RemoteError> {
        let response = self
            .client
            .delete(self.url(&format!("/cart/remove/{product_id}")))
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), RemoteError> {
        let response = self
            .client
            .delete(self.url("/cart/clear"))
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
