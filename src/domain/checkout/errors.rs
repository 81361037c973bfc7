use std::fmt;

use crate::remote::RemoteError;

// ============================================================================
// Checkout Errors
// ============================================================================

/// Which precondition blocked the submission. Checked in a fixed order, so
/// only the first missing piece is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteReason {
    MissingAddress,
    MissingDate,
    MissingTimeSlot,
    EmptyCart,
}

impl fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IncompleteReason::MissingAddress => "no delivery address selected",
            IncompleteReason::MissingDate => "no delivery date selected",
            IncompleteReason::MissingTimeSlot => "no delivery time slot selected",
            IncompleteReason::EmptyCart => "the cart is empty",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckoutError {
    #[error("cannot place order: {0}")]
    Incomplete(IncompleteReason),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
