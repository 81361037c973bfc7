use serde::{Deserialize, Serialize};

// ============================================================================
// Delivery Value Objects
// ============================================================================

/// A point on the map. Serialized as `{latitude, longitude}`, the shape the
/// order endpoint expects for `deliveryLocation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Label used when a map click resolves to coordinates the geocoder cannot
/// name. The point is still deliverable; only the label degrades.
pub const UNRESOLVED_ADDRESS: &str = "Address not determined";

/// The single current delivery destination, regardless of whether it came
/// from a map click, a text search or the device's own position.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTarget {
    pub coordinates: Coordinates,
    pub display_address: String,
}
