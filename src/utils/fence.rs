use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// Mutation Fence
// ============================================================================
//
// Orders concurrent cart refreshes. Every mutation draws a ticket before it
// talks to the backend; the snapshot it fetches afterwards may only replace
// local state if no higher ticket has landed in the meantime. A slow response
// that arrives after a newer one is dropped instead of rolling state back.
//
// ============================================================================

/// Monotonic ticket issuer shared by all mutations of one cart.
#[derive(Debug, Default)]
pub struct MutationFence {
    next: AtomicU64,
}

impl MutationFence {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Draw the next ticket. Tickets start at 1 so that a fresh fence
    /// (last applied = 0) accepts the first snapshot.
    pub fn issue(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }
}
