use crate::domain::cart::CartError;
use crate::domain::checkout::CheckoutError;
use crate::domain::delivery::DeliveryError;
use crate::remote::RemoteError;

// ============================================================================
// Crate-Level Error
// ============================================================================
//
// Thin aggregation for callers that drive several subsystems through one
// call path (the demo binary, a UI event loop). Each module keeps its own
// error type; this just lets them travel together.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_own_message() {
        let error = MarketError::from(CartError::LineNotFound(5));
        assert_eq!(error.to_string(), "product 5 is not in the cart");

        let error = MarketError::from(DeliveryError::EmptyQuery);
        assert_eq!(error.to_string(), "search query is empty");
    }
}
