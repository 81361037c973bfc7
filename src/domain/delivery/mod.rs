// ============================================================================
// Delivery Domain - Where and When an Order Arrives
// ============================================================================
//
// This module contains everything about the delivery destination and window:
// - Value objects (Coordinates, DeliveryTarget)
// - Time slot catalog
// - Schedule (date + slot selection)
// - Location resolver (map click / search / device position)
// - Errors (DeliveryError enum)
//
// ============================================================================

pub mod errors;
pub mod location;
pub mod schedule;
pub mod time_slots;
pub mod value_objects;

// Re-export for convenience
pub use errors::*;
pub use location::*;
pub use schedule::*;
pub use time_slots::*;
pub use value_objects::*;
