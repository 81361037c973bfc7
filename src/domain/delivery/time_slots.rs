// ============================================================================
// Delivery Time Slots
// ============================================================================
//
// Fixed catalog of delivery windows. Availability is a per-slot flag, not a
// function of the chosen date; the backend may eventually own this list, so
// the schedule accepts a custom catalog as well as the default one.
//
// ============================================================================

/// One delivery window offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: u8,
    /// Human-readable window, e.g. `10:00–12:00`. This exact string travels
    /// in the order request as `deliveryTimeSlot`.
    pub window: String,
    pub available: bool,
}

impl TimeSlot {
    fn new(id: u8, window: &str, available: bool) -> Self {
        Self {
            id,
            window: window.to_string(),
            available,
        }
    }
}

/// The storefront's standard four windows; the 14:00–16:00 slot is booked
/// out.
pub fn default_catalog() -> Vec<TimeSlot> {
    vec![
        TimeSlot::new(1, "10:00–12:00", true),
        TimeSlot::new(2, "12:00–14:00", true),
        TimeSlot::new(3, "14:00–16:00", false),
        TimeSlot::new(4, "16:00–18:00", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_one_unavailable_slot() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 4);

        let unavailable: Vec<_> = catalog.iter().filter(|slot| !slot.available).collect();
        assert_eq!(unavailable.len(), 1);
        assert_eq!(unavailable[0].id, 3);
        assert_eq!(unavailable[0].window, "14:00–16:00");
    }

    #[test]
    fn slot_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<u8> = catalog.iter().map(|slot| slot.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }
}
