// ============================================================================
// Cart Domain - Authoritative Mirror of the Server-Owned Cart
// ============================================================================
//
// This module contains ALL cart-specific code:
// - Value objects (CartSnapshot, CartLine, ProductInfo)
// - Stock guard (pure quantity validation)
// - Undo buffer (single-slot removal restore)
// - Errors (CartError enum)
// - Reconciler (two-phase mutate-then-refetch protocol)
//
// ============================================================================

pub mod errors;
pub mod reconciler;
pub mod stock;
pub mod undo;
pub mod value_objects;

// Re-export for convenience
pub use errors::*;
pub use reconciler::*;
pub use stock::*;
pub use undo::*;
pub use value_objects::*;
