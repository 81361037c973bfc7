// ============================================================================
// Remote Layer - Backend and Third-Party Clients
// ============================================================================
//
// Everything that crosses the network lives here:
// - Shared HTTP transport (session cookies, timeout, error mapping)
// - Cart service (fetch + mutations)
// - Order service (create, list)
// - Catalog service (product listing with stock)
// - Geocoding (Nominatim forward/reverse)
// - Device geolocation capability
//
// Each service is a trait so the domain layer can be tested against
// scripted implementations.
//
// ============================================================================

pub mod cart;
pub mod catalog;
pub mod geocoding;
pub mod geolocation;
pub mod http;
pub mod orders;

// Re-export for convenience
pub use cart::CartService;
pub use catalog::CatalogService;
pub use geocoding::{GeocodedPlace, Geocoder, NominatimGeocoder};
pub use geolocation::{DeviceLocator, PositionError, UnsupportedLocator};
pub use http::{MarketApi, RemoteError};
pub use orders::OrderService;
