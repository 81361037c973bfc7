use async_trait::async_trait;
use reqwest::Client;

use super::http::{build_client, RemoteError};
use crate::config::MarketConfig;
use crate::domain::delivery::Coordinates;
use crate::models::{ReverseGeocodePayload, SearchGeocodePayload};

// ============================================================================
// Geocoding Service
// ============================================================================
//
// Translates between coordinates and street addresses through a
// Nominatim-compatible endpoint. Forward lookups are capped at one hit:
// the storefront always takes the best match rather than offering a list.
//
// ============================================================================

/// A named location returned by a forward geocode.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub coordinates: Coordinates,
    pub display_name: String,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Human-readable address for a point, if the provider knows one.
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>, RemoteError>;

    /// Best matches for a free-form address query, best first.
    async fn forward(&self, query: &str) -> Result<Vec<GeocodedPlace>, RemoteError>;
}

pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &MarketConfig) -> Result<Self, RemoteError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.geocoder_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>, RemoteError> {
        let response = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("format", "json".to_string()),
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("zoom", "18".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        if !response.status().is_success() {
            return Err(RemoteError::Service {
                status: response.status().as_u16(),
                message: format!("geocoder returned HTTP {}", response.status().as_u16()),
            });
        }
        let payload = response
            .json::<ReverseGeocodePayload>()
            .await
            .map_err(|error| RemoteError::Decode(error.to_string()))?;
        Ok(payload.display_name)
    }

    async fn forward(&self, query: &str) -> Result<Vec<GeocodedPlace>, RemoteError> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        if !response.status().is_success() {
            return Err(RemoteError::Service {
                status: response.status().as_u16(),
                message: format!("geocoder returned HTTP {}", response.status().as_u16()),
            });
        }
        let hits = response
            .json::<Vec<SearchGeocodePayload>>()
            .await
            .map_err(|error| RemoteError::Decode(error.to_string()))?;
        hits.into_iter().map(place_from_hit).collect()
    }
}

/// Nominatim serializes coordinates as strings; reject hits whose numbers
/// fail to parse instead of silently pinning the map to 0,0.
fn place_from_hit(hit: SearchGeocodePayload) -> Result<GeocodedPlace, RemoteError> {
    let latitude = hit
        .lat
        .parse::<f64>()
        .map_err(|error| RemoteError::Decode(format!("bad latitude {:?}: {error}", hit.lat)))?;
    let longitude = hit
        .lon
        .parse::<f64>()
        .map_err(|error| RemoteError::Decode(format!("bad longitude {:?}: {error}", hit.lon)))?;
    Ok(GeocodedPlace {
        coordinates: Coordinates::new(latitude, longitude),
        display_name: hit.display_name,
    })
}
