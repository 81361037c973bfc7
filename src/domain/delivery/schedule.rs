use chrono::{Local, NaiveDate};

use super::errors::DeliveryError;
use super::time_slots::{default_catalog, TimeSlot};

// ============================================================================
// Delivery Schedule
// ============================================================================
//
// Date and time-slot selection for checkout. Both start unset and must be
// chosen explicitly before an order can go out; neither is ever derived
// from the other.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct DeliverySchedule {
    catalog: Vec<TimeSlot>,
    date: Option<NaiveDate>,
    slot: Option<TimeSlot>,
}

impl DeliverySchedule {
    pub fn new() -> Self {
        Self::with_catalog(default_catalog())
    }

    pub fn with_catalog(catalog: Vec<TimeSlot>) -> Self {
        Self {
            catalog,
            date: None,
            slot: None,
        }
    }

    /// Pick a delivery date. Today is the earliest acceptable choice, same
    /// rule the date picker enforces in the UI.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<(), DeliveryError> {
        if date < Local::now().date_naive() {
            return Err(DeliveryError::DateInPast(date));
        }
        self.date = Some(date);
        Ok(())
    }

    /// Pick a delivery window by id. The UI disables unavailable slots, but
    /// an unavailable or unknown id is still rejected here.
    pub fn select_slot(&mut self, slot_id: u8) -> Result<(), DeliveryError> {
        let slot = self
            .catalog
            .iter()
            .find(|slot| slot.id == slot_id)
            .ok_or(DeliveryError::UnknownTimeSlot(slot_id))?;
        if !slot.available {
            return Err(DeliveryError::SlotUnavailable(slot.window.clone()));
        }
        self.slot = Some(slot.clone());
        Ok(())
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn slot(&self) -> Option<&TimeSlot> {
        self.slot.as_ref()
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.catalog
    }
}

impl Default for DeliverySchedule {
    fn default() -> Self {
        Self::new()
    }
}
