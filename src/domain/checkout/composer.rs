use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tokio::sync::Mutex;

use super::errors::{CheckoutError, IncompleteReason};
use crate::domain::cart::CartReconciler;
use crate::domain::delivery::{DeliveryError, DeliverySchedule, LocationResolver, TimeSlot};
use crate::models::{OrderRecord, OrderRequest};
use crate::notify::BadgeSink;
use crate::remote::OrderService;

// ============================================================================
// Checkout Composer
// ============================================================================
//
// The last gate before an order leaves the client. Three independent pieces
// of readiness - a delivery address, a date, a time slot - plus a non-empty
// cart must all be in place; the first missing one is reported and nothing
// touches the network. Cart contents are not part of the request: the
// backend builds the order from its own cart for this session.
//
// ============================================================================

pub struct CheckoutComposer {
    cart: Arc<CartReconciler>,
    location: Arc<LocationResolver>,
    orders: Arc<dyn OrderService>,
    badges: Arc<dyn BadgeSink>,
    schedule: Mutex<DeliverySchedule>,
}

impl CheckoutComposer {
    pub fn new(
        cart: Arc<CartReconciler>,
        location: Arc<LocationResolver>,
        orders: Arc<dyn OrderService>,
        badges: Arc<dyn BadgeSink>,
    ) -> Self {
        Self::with_schedule(cart, location, orders, badges, DeliverySchedule::new())
    }

    pub fn with_schedule(
        cart: Arc<CartReconciler>,
        location: Arc<LocationResolver>,
        orders: Arc<dyn OrderService>,
        badges: Arc<dyn BadgeSink>,
        schedule: DeliverySchedule,
    ) -> Self {
        Self {
            cart,
            location,
            orders,
            badges,
            schedule: Mutex::new(schedule),
        }
    }

    pub async fn set_date(&self, date: NaiveDate) -> Result<(), DeliveryError> {
        self.schedule.lock().await.set_date(date)
    }

    pub async fn select_slot(&self, slot_id: u8) -> Result<(), DeliveryError> {
        self.schedule.lock().await.select_slot(slot_id)
    }

    /// The slot catalog, for rendering the picker.
    pub async fn slots(&self) -> Vec<TimeSlot> {
        self.schedule.lock().await.slots().to_vec()
    }

    /// Place the order for everything currently in the cart.
    ///
    /// On success the local cart resets to empty and the order badge is
    /// refreshed from the remote order list; a failed refresh is logged and
    /// swallowed, since the order itself already exists.
    pub async fn submit(&self) -> Result<OrderRecord, CheckoutError> {
        let Some(target) = self.location.current().await else {
            return Err(CheckoutError::Incomplete(IncompleteReason::MissingAddress));
        };
        let (date, slot) = {
            let schedule = self.schedule.lock().await;
            let Some(date) = schedule.date() else {
                return Err(CheckoutError::Incomplete(IncompleteReason::MissingDate));
            };
            let Some(slot) = schedule.slot().cloned() else {
                return Err(CheckoutError::Incomplete(IncompleteReason::MissingTimeSlot));
            };
            (date, slot)
        };
        if self.cart.snapshot().await.is_empty() {
            return Err(CheckoutError::Incomplete(IncompleteReason::EmptyCart));
        }

        let request = OrderRequest {
            delivery_address: target.display_address,
            delivery_location: target.coordinates,
            delivery_time_slot: slot.window,
            // The backend expects a full instant; midnight UTC of the
            // chosen day.
            delivery_date: date.and_time(NaiveTime::MIN).and_utc(),
        };

        tracing::info!(
            address = %request.delivery_address,
            date = %date,
            slot = %request.delivery_time_slot,
            "submitting order"
        );
        let record = self.orders.create_order(&request).await?;
        tracing::info!(order_id = record.id, "order created");

        self.cart.reset_after_order().await;
        match self.orders.list_orders().await {
            Ok(orders) => self.badges.set_order_count(orders.len()),
            Err(error) => {
                tracing::warn!(%error, "order badge refresh failed after creation");
            }
        }

        Ok(record)
    }
}
