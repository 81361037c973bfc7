// ============================================================================
// agromarket-client - Cart & Checkout Core for the AgroMarket Storefront
// ============================================================================
//
// Client-side cart and checkout logic against a server-owned cart:
// - Cart reconciler: every mutation is two-phase (send, then re-fetch the
//   whole cart), so local state is always a confirmed server snapshot
// - Stock guard: quantity changes validated before they touch the network
// - Undo buffer: one-slot restore of the last removed line
// - Location resolver: map click / address search / device position, one
//   canonical delivery target
// - Checkout composer: address + date + time slot + non-empty cart gate,
//   then order submission
//
// The network edges (backend REST API, Nominatim geocoder, device
// positioning) are traits in `remote`, with HTTP implementations included.
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod notify;
pub mod remote;
pub mod utils;

// Re-export the main entry points
pub use config::MarketConfig;
pub use domain::cart::{CartReconciler, CartSnapshot};
pub use domain::checkout::CheckoutComposer;
pub use domain::delivery::{DeliveryTarget, LocationInput, LocationResolver};
pub use error::MarketError;
pub use notify::BadgeSink;
