// ============================================================================
// Stock Guard
// ============================================================================
//
// Pure gate in front of every quantity mutation. A request the guard
// rejects never reaches the network: dropping below one unit is silently
// ignored (the row's minus button at quantity 1 does nothing), exceeding
// stock is a user-visible validation error.
//
// ============================================================================

/// Verdict on a proposed quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecision {
    /// The change is valid; `new_quantity` is the resulting line quantity.
    Accepted { new_quantity: u32 },
    /// The change would drop the quantity below one. Treated as a no-op.
    BelowMinimum,
    /// The change would exceed the known stock level.
    OutOfStock,
}

impl StockDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, StockDecision::Accepted { .. })
    }
}

/// Decide whether a line at `current` units may change by `delta` given
/// `stock` units on hand. Accepts iff `1 <= current + delta <= stock`.
pub fn can_change(current: u32, delta: i64, stock: u32) -> StockDecision {
    let target = current as i64 + delta;
    if target < 1 {
        StockDecision::BelowMinimum
    } else if target > stock as i64 {
        StockDecision::OutOfStock
    } else {
        StockDecision::Accepted {
            new_quantity: target as u32,
        }
    }
}
