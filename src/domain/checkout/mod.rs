// ============================================================================
// Checkout Domain - Order Assembly and Submission
// ============================================================================
//
// This module contains the checkout-specific code:
// - Composer (readiness gate over address/date/slot + non-empty cart)
// - Errors (CheckoutError, IncompleteReason)
//
// ============================================================================

pub mod composer;
pub mod errors;

// Re-export for convenience
pub use composer::*;
pub use errors::*;
