use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::delivery::Coordinates;

// ============================================================================
// Wire Models
// ============================================================================
//
// Payloads exchanged with the marketplace backend and the geocoder, kept
// separate from the domain types so serializer quirks stay at the edge.
// The backend serializes collections with reference preservation, so any
// array may arrive either bare or wrapped as `{"$id": "1", "$values": [..]}`.
// Deserialization here accepts both shapes.
//
// ============================================================================

/// A JSON array that tolerates the `$values` wrapper emitted by
/// reference-preserving serializers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValueList<T> {
    Plain(Vec<T>),
    Wrapped {
        #[serde(rename = "$values")]
        values: Vec<T>,
    },
}

impl<T> ValueList<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ValueList::Plain(values) => values,
            ValueList::Wrapped { values } => values,
        }
    }
}

impl<T> Default for ValueList<T> {
    fn default() -> Self {
        ValueList::Plain(Vec::new())
    }
}

/// Deserializes a field that may be absent, `null`, a bare array or a
/// `$values`-wrapped array into a plain `Vec`.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let list = Option::<ValueList<T>>::deserialize(deserializer)?;
    Ok(list.map(ValueList::into_vec).unwrap_or_default())
}

// ============================================================================
// Cart payloads
// ============================================================================

/// The cart document as the backend returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartPayload {
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Vec<CartItemPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemPayload {
    #[serde(default)]
    pub id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub quantity: u32,
    /// Product snapshot joined in by the backend; occasionally missing when
    /// the product was delisted between writes.
    #[serde(default)]
    pub product: Option<ProductPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

// ============================================================================
// Order payloads
// ============================================================================

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub delivery_address: String,
    pub delivery_location: Coordinates,
    pub delivery_time_slot: String,
    pub delivery_date: DateTime<Utc>,
}

/// An order as returned by the backend, both from creation and listing.
/// Everything beyond the id is optional; older rows miss fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: i64,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivery_time_slot: Option<String>,
}

// ============================================================================
// Catalog payloads
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

// ============================================================================
// Geocoder payloads
// ============================================================================

/// Nominatim `/reverse` response; `display_name` is absent for coordinates
/// that resolve to nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseGeocodePayload {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One hit from Nominatim `/search`. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchGeocodePayload {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}
