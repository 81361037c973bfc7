use std::time::{Duration, Instant};

use super::value_objects::ProductId;

// ============================================================================
// Undo Buffer
// ============================================================================
//
// Single-slot memory of the last removed cart line. Removing a line
// overwrites the slot; any other mutation or the expiry of the window
// discards it. The slot is advisory only - the backend knows nothing about
// it, and losing it loses nothing but the one-click restore.
//
// ============================================================================

/// What it takes to restore the last removed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingUndo {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Holds at most one pending undo, valid until its deadline passes.
#[derive(Debug)]
pub struct UndoSlot {
    window: Duration,
    entry: Option<(PendingUndo, Instant)>,
}

impl UndoSlot {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entry: None,
        }
    }

    /// Remember a removal, overwriting whatever was here before. Only the
    /// most recent removal is undoable.
    pub fn capture(&mut self, product_id: ProductId, quantity: u32) {
        let undo = PendingUndo {
            product_id,
            quantity,
        };
        self.entry = Some((undo, Instant::now() + self.window));
    }

    /// The pending undo, if one exists and its window has not passed. An
    /// expired entry is dropped on access.
    pub fn peek(&mut self) -> Option<PendingUndo> {
        match &self.entry {
            Some((undo, deadline)) if Instant::now() <= *deadline => Some(*undo),
            Some(_) => {
                self.entry = None;
                None
            }
            None => None,
        }
    }

    /// Drop the slot regardless of its state.
    pub fn discard(&mut self) {
        self.entry = None;
    }
}
