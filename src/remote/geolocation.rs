use async_trait::async_trait;

use crate::domain::delivery::Coordinates;

// ============================================================================
// Device Geolocation
// ============================================================================
//
// Where "use my location" gets its fix from. Browsers have a positioning
// API; a headless client usually has nothing, so the default implementation
// reports the capability as unsupported and the resolver surfaces that to
// the user instead of guessing.
//
// ============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum PositionError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable: {0}")]
    Unavailable(String),
    #[error("geolocation is not supported on this device")]
    Unsupported,
}

#[async_trait]
pub trait DeviceLocator: Send + Sync {
    /// Current position of the device running the client.
    async fn current_position(&self) -> Result<Coordinates, PositionError>;
}

/// Locator for environments without positioning hardware or APIs.
#[derive(Debug, Default)]
pub struct UnsupportedLocator;

#[async_trait]
impl DeviceLocator for UnsupportedLocator {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        Err(PositionError::Unsupported)
    }
}
