// ============================================================================
// Badge Notifications
// ============================================================================
//
// The storefront shell shows two counters: items in the cart and orders
// placed. The core pushes updated counts through this sink whenever a
// mutation lands, so whatever hosts the client (a UI shell, the demo binary)
// decides how to render them.
//
// ============================================================================

/// Receiver for header badge updates.
pub trait BadgeSink: Send + Sync {
    /// Total quantity across all cart lines after the latest mutation.
    fn set_cart_count(&self, count: u32);

    /// Number of orders on record for the current session.
    fn set_order_count(&self, count: usize);
}

/// Sink that drops every update. Useful when no shell is attached.
#[derive(Debug, Default)]
pub struct NullBadgeSink;

impl BadgeSink for NullBadgeSink {
    fn set_cart_count(&self, _count: u32) {}

    fn set_order_count(&self, _count: usize) {}
}
