use chrono::NaiveDate;

use crate::remote::RemoteError;

// ============================================================================
// Delivery Errors
// ============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum DeliveryError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("no address found for \"{0}\"")]
    AddressNotFound(String),

    #[error("device location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("delivery date {0} is in the past")]
    DateInPast(NaiveDate),

    #[error("unknown time slot id: {0}")]
    UnknownTimeSlot(u8),

    #[error("time slot {0} is not available")]
    SlotUnavailable(String),

    #[error("geocoding failed: {0}")]
    Geocode(#[from] RemoteError),
}
