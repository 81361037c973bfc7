use super::value_objects::ProductId;
use crate::remote::RemoteError;

// ============================================================================
// Cart Errors
// ============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum CartError {
    #[error("not enough stock: requested {requested}, only {stock} available")]
    OutOfStock { requested: u32, stock: u32 },

    #[error("product {0} is not in the cart")]
    LineNotFound(ProductId),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
