use std::sync::Arc;

use tokio::sync::Mutex;

use super::errors::DeliveryError;
use super::value_objects::{Coordinates, DeliveryTarget, UNRESOLVED_ADDRESS};
use crate::remote::{DeviceLocator, Geocoder};

// ============================================================================
// Location Resolver
// ============================================================================
//
// Three ways to pick a delivery destination - clicking the map, typing an
// address, or asking the device for its position - all funnel into one
// canonical DeliveryTarget. The latest successful resolution wins, whichever
// path produced it; no history is kept.
//
// Geocoding is best-effort on the map and device paths: a click is a
// deliberate choice of coordinates, so a failed reverse lookup only costs
// the label, never the selection. The search path is the opposite - there
// the geocoder is the source of the coordinates, so its failures surface.
//
// ============================================================================

/// One user gesture that should produce a delivery destination.
#[derive(Debug, Clone)]
pub enum LocationInput {
    /// The user clicked a point on the map.
    MapClick { coordinates: Coordinates },
    /// The user typed a free-text address.
    Search { query: String },
    /// The user asked to use the device's own position.
    Device,
}

pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    locator: Arc<dyn DeviceLocator>,
    current: Mutex<Option<DeliveryTarget>>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, locator: Arc<dyn DeviceLocator>) -> Self {
        Self {
            geocoder,
            locator,
            current: Mutex::new(None),
        }
    }

    /// Resolve one input gesture into the current delivery target.
    ///
    /// On success the returned target has also replaced the stored one; on
    /// error the stored target is unchanged.
    pub async fn resolve(&self, input: LocationInput) -> Result<DeliveryTarget, DeliveryError> {
        let target = match input {
            LocationInput::MapClick { coordinates } => self.label_point(coordinates).await,
            LocationInput::Search { query } => self.search(&query).await?,
            LocationInput::Device => {
                let coordinates = self
                    .locator
                    .current_position()
                    .await
                    .map_err(|error| DeliveryError::LocationUnavailable(error.to_string()))?;
                self.label_point(coordinates).await
            }
        };

        tracing::info!(
            latitude = target.coordinates.latitude,
            longitude = target.coordinates.longitude,
            address = %target.display_address,
            "delivery target updated"
        );
        *self.current.lock().await = Some(target.clone());
        Ok(target)
    }

    /// The latest successfully resolved target, if any path has produced one.
    pub async fn current(&self) -> Option<DeliveryTarget> {
        self.current.lock().await.clone()
    }

    /// Coordinates are already chosen; attach the best label we can get.
    async fn label_point(&self, coordinates: Coordinates) -> DeliveryTarget {
        let display_address = match self.geocoder.reverse(coordinates).await {
            Ok(Some(label)) => label,
            Ok(None) => UNRESOLVED_ADDRESS.to_string(),
            Err(error) => {
                tracing::warn!(%error, "reverse geocoding failed, keeping coordinates");
                UNRESOLVED_ADDRESS.to_string()
            }
        };
        DeliveryTarget {
            coordinates,
            display_address,
        }
    }

    async fn search(&self, query: &str) -> Result<DeliveryTarget, DeliveryError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DeliveryError::EmptyQuery);
        }

        let hits = self.geocoder.forward(query).await?;
        let best = hits
            .into_iter()
            .next()
            .ok_or_else(|| DeliveryError::AddressNotFound(query.to_string()))?;

        Ok(DeliveryTarget {
            coordinates: best.coordinates,
            display_address: best.display_name,
        })
    }
}
