// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains the storefront's domain logic, one subdirectory per
// concern:
// - cart: the authoritative mirror of the server-owned cart
// - delivery: destination, date and time-slot selection
// - checkout: the submission gate that ties the two together
//
// This layer talks to the network only through the traits in `remote`.
//
// ============================================================================

pub mod cart;
pub mod checkout;
pub mod delivery;
