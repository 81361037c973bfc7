use async_trait::async_trait;

use super::http::{MarketApi, RemoteError};
use crate::models::{OrderRecord, OrderRequest, ValueList};

// ============================================================================
// Order Service
// ============================================================================

#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submit a new order for everything currently in the session cart.
    /// The backend builds the order from its own cart state; the request
    /// only carries the delivery details.
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderRecord, RemoteError>;

    /// All orders placed by the current session, newest last.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, RemoteError>;
}

#[async_trait]
impl OrderService for MarketApi {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderRecord, RemoteError> {
        let response = self
            .client
            .post(self.url("/orders"))
            .json(request)
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        let response = Self::ensure_success(response).await?;
        response
            .json::<OrderRecord>()
            .await
            .map_err(|error| RemoteError::Decode(error.to_string()))
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, RemoteError> {
        let response = self
            .client
            .get(self.url("/orders"))
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        let response = Self::ensure_success(response).await?;
        let listing = response
            .json::<ValueList<OrderRecord>>()
            .await
            .map_err(|error| RemoteError::Decode(error.to_string()))?;
        Ok(listing.into_vec())
    }
}
