use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uuid::Uuid;

use super::errors::CartError;
use super::stock::{can_change, StockDecision};
use super::undo::{PendingUndo, UndoSlot};
use super::value_objects::{CartSnapshot, ProductId};
use crate::notify::BadgeSink;
use crate::remote::CartService;
use crate::utils::MutationFence;

// ============================================================================
// Cart Reconciler
// ============================================================================
//
// Keeps the local cart an authoritative mirror of the backend's. Every
// mutation is two-phase: (a) send the mutation, (b) unconditionally
// re-fetch the full cart and replace the local snapshot wholesale. Local
// state is never patched optimistically, so it can never drift from what
// the server holds.
//
// Overlapping mutations are ordered by the fence: each draws a ticket
// before its remote phase, and a fetched snapshot is applied only if its
// ticket is newer than the last applied one. A slow re-fetch that loses the
// race is dropped on arrival.
//
// A failed remote call aborts the protocol with the snapshot untouched;
// retrying is the user's choice, never automatic.
//
// ============================================================================

struct CartState {
    snapshot: CartSnapshot,
    undo: UndoSlot,
    /// Ticket of the snapshot currently applied.
    last_applied: u64,
}

pub struct CartReconciler {
    service: Arc<dyn CartService>,
    badges: Arc<dyn BadgeSink>,
    fence: MutationFence,
    state: Mutex<CartState>,
}

impl CartReconciler {
    pub fn new(
        service: Arc<dyn CartService>,
        badges: Arc<dyn BadgeSink>,
        undo_window: Duration,
    ) -> Self {
        Self {
            service,
            badges,
            fence: MutationFence::new(),
            state: Mutex::new(CartState {
                snapshot: CartSnapshot::empty(),
                undo: UndoSlot::new(undo_window),
                last_applied: 0,
            }),
        }
    }

    /// Add `quantity` units of a product. `known_stock` is the stock level
    /// the catalog last reported for it; the guard runs against that before
    /// anything goes over the wire.
    pub async fn add_item(
        &self,
        product_id: ProductId,
        quantity: u32,
        known_stock: u32,
    ) -> Result<(), CartError> {
        if quantity < 1 {
            tracing::debug!(product_id, "add of zero units, ignoring");
            return Ok(());
        }

        let correlation_id = Uuid::new_v4();
        let current = {
            let state = self.state.lock().await;
            state
                .snapshot
                .line(product_id)
                .map(|line| line.quantity)
                .unwrap_or(0)
        };

        match can_change(current, quantity as i64, known_stock) {
            StockDecision::BelowMinimum => {
                tracing::debug!(product_id, quantity, "add below minimum, ignoring");
                return Ok(());
            }
            StockDecision::OutOfStock => {
                tracing::info!(product_id, quantity, known_stock, "add rejected by stock guard");
                return Err(CartError::OutOfStock {
                    requested: current + quantity,
                    stock: known_stock,
                });
            }
            StockDecision::Accepted { new_quantity } => {
                tracing::info!(%correlation_id, product_id, quantity, new_quantity, "adding item to cart");
            }
        }

        let ticket = self.fence.issue();
        self.service.add_item(product_id, quantity).await?;
        self.confirm(ticket).await?;
        self.drop_pending_undo().await;
        Ok(())
    }

    /// Set the absolute quantity of an existing line. A target below one is
    /// a silent no-op; a missing line is a local validation error.
    pub async fn set_quantity(&self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity < 1 {
            tracing::debug!(product_id, "quantity below one, ignoring");
            return Ok(());
        }

        let correlation_id = Uuid::new_v4();
        {
            let state = self.state.lock().await;
            let line = state
                .snapshot
                .line(product_id)
                .ok_or(CartError::LineNotFound(product_id))?;
            let delta = quantity as i64 - line.quantity as i64;
            match can_change(line.quantity, delta, line.product.stock) {
                StockDecision::BelowMinimum => return Ok(()),
                StockDecision::OutOfStock => {
                    tracing::info!(product_id, quantity, stock = line.product.stock, "quantity change rejected by stock guard");
                    return Err(CartError::OutOfStock {
                        requested: quantity,
                        stock: line.product.stock,
                    });
                }
                StockDecision::Accepted { .. } => {}
            }
        }

        tracing::info!(%correlation_id, product_id, quantity, "updating cart quantity");
        let ticket = self.fence.issue();
        self.service.update_item(product_id, quantity).await?;
        self.confirm(ticket).await?;
        self.drop_pending_undo().await;
        Ok(())
    }

    /// Remove a product's line. The prior quantity is captured so the
    /// removal can be undone within the window; removing a product that is
    /// not in the cart is a no-op.
    pub async fn remove_item(&self, product_id: ProductId) -> Result<(), CartError> {
        let correlation_id = Uuid::new_v4();
        let quantity = {
            let state = self.state.lock().await;
            let Some(line) = state.snapshot.line(product_id) else {
                tracing::debug!(product_id, "remove for absent line, ignoring");
                return Ok(());
            };
            line.quantity
        };

        tracing::info!(%correlation_id, product_id, quantity, "removing item from cart");
        let ticket = self.fence.issue();
        self.service.remove_item(product_id).await?;
        // Only a delete the backend confirmed is undoable; a failed one
        // leaves the line in the cart and the slot as it was.
        self.state.lock().await.undo.capture(product_id, quantity);
        self.confirm(ticket).await
    }

    /// Restore the most recently removed line at its old quantity. A no-op
    /// when nothing is pending or the window has passed.
    pub async fn undo_removal(&self) -> Result<(), CartError> {
        let Some(undo) = self.state.lock().await.undo.peek() else {
            tracing::debug!("no removal to undo");
            return Ok(());
        };

        // No stock guard here: the quantity was valid when the line was
        // removed, and the removed line carries no stock figure anymore.
        let correlation_id = Uuid::new_v4();
        tracing::info!(%correlation_id, product_id = undo.product_id, quantity = undo.quantity, "restoring removed item");
        let ticket = self.fence.issue();
        self.service
            .update_item(undo.product_id, undo.quantity)
            .await?;
        self.confirm(ticket).await?;

        let mut state = self.state.lock().await;
        if state.undo.peek() == Some(undo) {
            state.undo.discard();
        }
        Ok(())
    }

    /// Empty the cart. Emptiness is guaranteed by the backend on success,
    /// so the empty snapshot is applied directly without a re-fetch.
    pub async fn clear(&self) -> Result<(), CartError> {
        let correlation_id = Uuid::new_v4();
        tracing::info!(%correlation_id, "clearing cart");
        let ticket = self.fence.issue();
        self.service.clear().await?;
        self.apply(ticket, CartSnapshot::empty()).await;
        self.drop_pending_undo().await;
        Ok(())
    }

    /// Fetch the cart and replace the local snapshot; used at startup and
    /// whenever the caller wants to resynchronize without mutating.
    pub async fn refresh(&self) -> Result<(), CartError> {
        let ticket = self.fence.issue();
        self.confirm(ticket).await
    }

    /// After a successful order the backend has emptied the cart; mirror
    /// that locally without another round trip.
    pub(crate) async fn reset_after_order(&self) {
        let ticket = self.fence.issue();
        self.apply(ticket, CartSnapshot::empty()).await;
        self.drop_pending_undo().await;
    }

    /// The snapshot as of the last successful fetch.
    pub async fn snapshot(&self) -> CartSnapshot {
        self.state.lock().await.snapshot.clone()
    }

    /// Units across all lines, the cart badge number.
    pub async fn total_quantity(&self) -> u32 {
        self.state.lock().await.snapshot.total_quantity()
    }

    /// The removal that can currently be undone, if any.
    pub async fn pending_undo(&self) -> Option<PendingUndo> {
        self.state.lock().await.undo.peek()
    }

    /// Phase (b) of the protocol: re-fetch the authoritative cart and apply
    /// it under this mutation's ticket.
    async fn confirm(&self, ticket: u64) -> Result<(), CartError> {
        let payload = self.service.fetch_cart().await?;
        self.apply(ticket, CartSnapshot::from(payload)).await;
        Ok(())
    }

    /// Replace the local snapshot unless a newer mutation already did.
    async fn apply(&self, ticket: u64, snapshot: CartSnapshot) {
        let count = {
            let mut state = self.state.lock().await;
            if ticket <= state.last_applied {
                tracing::debug!(
                    ticket,
                    last_applied = state.last_applied,
                    "discarding stale cart snapshot"
                );
                return;
            }
            state.last_applied = ticket;
            state.snapshot = snapshot;
            state.snapshot.total_quantity()
        };
        self.badges.set_cart_count(count);
    }

    /// Any confirmed mutation other than a removal invalidates the undo.
    async fn drop_pending_undo(&self) {
        self.state.lock().await.undo.discard();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CartItemPayload, CartPayload, ProductPayload};
    use crate::notify::NullBadgeSink;
    use crate::remote::RemoteError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex as StdMutex;

    /// In-memory stand-in for the backend: holds the server-side cart and
    /// records every call so tests can assert nothing hit the network.
    struct FakeBackend {
        products: HashMap<ProductId, ProductPayload>,
        items: StdMutex<Vec<(ProductId, u32)>>,
        calls: StdMutex<Vec<String>>,
        fail_mutations: AtomicBool,
    }

    impl FakeBackend {
        fn new(products: Vec<(ProductId, &str, f64, u32)>) -> Self {
            Self {
                products: products
                    .into_iter()
                    .map(|(id, name, price, stock)| {
                        (
                            id,
                            ProductPayload {
                                name: name.to_string(),
                                price,
                                stock,
                            },
                        )
                    })
                    .collect(),
                items: StdMutex::new(Vec::new()),
                calls: StdMutex::new(Vec::new()),
                fail_mutations: AtomicBool::new(false),
            }
        }

        fn seed(&self, product_id: ProductId, quantity: u32) {
            self.items.lock().unwrap().push((product_id, quantity));
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn check_failure(&self) -> Result<(), RemoteError> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                Err(RemoteError::Service {
                    status: 500,
                    message: "backend unavailable".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CartService for FakeBackend {
        async fn fetch_cart(&self) -> Result<CartPayload, RemoteError> {
            self.record("fetch");
            let items = self
                .items
                .lock()
                .unwrap()
                .iter()
                .enumerate()
                .map(|(index, (product_id, quantity))| CartItemPayload {
                    id: index as i64 + 1,
                    product_id: *product_id,
                    quantity: *quantity,
                    product: self.products.get(product_id).cloned(),
                })
                .collect();
            Ok(CartPayload { items })
        }

        async fn add_item(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError> {
            self.record(format!("add {product_id} {quantity}"));
            self.check_failure()?;
            let mut items = self.items.lock().unwrap();
            match items.iter_mut().find(|(id, _)| *id == product_id) {
                Some((_, existing)) => *existing += quantity,
                None => items.push((product_id, quantity)),
            }
            Ok(())
        }

        async fn update_item(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError> {
            self.record(format!("update {product_id} {quantity}"));
            self.check_failure()?;
            let mut items = self.items.lock().unwrap();
            match items.iter_mut().find(|(id, _)| *id == product_id) {
                Some((_, existing)) => *existing = quantity,
                // The backend re-creates the line, which is what the undo
                // path relies on.
                None => items.push((product_id, quantity)),
            }
            Ok(())
        }

        async fn remove_item(&self, product_id: ProductId) -> Result<(), RemoteError> {
            self.record(format!("remove {product_id}"));
            self.check_failure()?;
            self.items.lock().unwrap().retain(|(id, _)| *id != product_id);
            Ok(())
        }

        async fn clear(&self) -> Result<(), RemoteError> {
            self.record("clear");
            self.check_failure()?;
            self.items.lock().unwrap().clear();
            Ok(())
        }
    }

    struct RecordingBadges {
        cart_counts: StdMutex<Vec<u32>>,
    }

    impl RecordingBadges {
        fn new() -> Self {
            Self {
                cart_counts: StdMutex::new(Vec::new()),
            }
        }
    }

    impl BadgeSink for RecordingBadges {
        fn set_cart_count(&self, count: u32) {
            self.cart_counts.lock().unwrap().push(count);
        }

        fn set_order_count(&self, _count: usize) {}
    }

    fn reconciler(backend: Arc<FakeBackend>) -> CartReconciler {
        CartReconciler::new(backend, Arc::new(NullBadgeSink), Duration::from_secs(10))
    }

    #[tokio::test]
    async fn add_item_replaces_snapshot_from_the_refetch() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        let badges = Arc::new(RecordingBadges::new());
        let cart = CartReconciler::new(backend.clone(), badges.clone(), Duration::from_secs(10));

        cart.add_item(5, 2, 10).await.unwrap();

        let snapshot = cart.snapshot().await;
        assert_eq!(snapshot.line(5).unwrap().quantity, 2);
        assert_eq!(snapshot.line(5).unwrap().product.name, "Tomatoes");
        assert_eq!(backend.calls(), vec!["add 5 2", "fetch"]);
        assert_eq!(*badges.cart_counts.lock().unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn out_of_stock_add_never_reaches_the_network() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 1)]));
        let cart = reconciler(backend.clone());

        let result = cart.add_item(5, 2, 1).await;

        assert!(matches!(
            result,
            Err(CartError::OutOfStock {
                requested: 2,
                stock: 1
            })
        ));
        assert!(backend.calls().is_empty());
        assert!(cart.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn add_of_zero_units_is_a_silent_noop() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        backend.seed(5, 2);
        let cart = reconciler(backend.clone());
        cart.refresh().await.unwrap();
        let calls_before = backend.calls().len();

        cart.add_item(5, 0, 10).await.unwrap();

        assert_eq!(backend.calls().len(), calls_before);
        assert_eq!(cart.snapshot().await.line(5).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn set_quantity_is_idempotent() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        backend.seed(5, 1);
        let cart = reconciler(backend.clone());
        cart.refresh().await.unwrap();

        cart.set_quantity(5, 4).await.unwrap();
        let once = cart.snapshot().await;
        cart.set_quantity(5, 4).await.unwrap();
        let twice = cart.snapshot().await;

        assert_eq!(once, twice);
        assert_eq!(twice.line(5).unwrap().quantity, 4);
    }

    #[tokio::test]
    async fn set_quantity_below_one_is_a_silent_noop() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        backend.seed(5, 2);
        let cart = reconciler(backend.clone());
        cart.refresh().await.unwrap();
        let calls_before = backend.calls().len();

        cart.set_quantity(5, 0).await.unwrap();

        assert_eq!(backend.calls().len(), calls_before);
        assert_eq!(cart.snapshot().await.line(5).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn set_quantity_for_a_missing_line_is_a_local_error() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        let cart = reconciler(backend.clone());

        let result = cart.set_quantity(99, 2).await;

        assert!(matches!(result, Err(CartError::LineNotFound(99))));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn set_quantity_beyond_stock_is_rejected_locally() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 3)]));
        backend.seed(5, 2);
        let cart = reconciler(backend.clone());
        cart.refresh().await.unwrap();
        let calls_before = backend.calls().len();

        let result = cart.set_quantity(5, 4).await;

        assert!(matches!(result, Err(CartError::OutOfStock { .. })));
        assert_eq!(backend.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn remove_then_undo_restores_the_original_quantity() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        backend.seed(5, 3);
        let cart = reconciler(backend.clone());
        cart.refresh().await.unwrap();

        cart.remove_item(5).await.unwrap();
        assert!(cart.snapshot().await.is_empty());
        assert_eq!(
            cart.pending_undo().await,
            Some(PendingUndo {
                product_id: 5,
                quantity: 3
            })
        );

        cart.undo_removal().await.unwrap();

        let snapshot = cart.snapshot().await;
        assert_eq!(snapshot.line(5).unwrap().quantity, 3);
        assert_eq!(cart.pending_undo().await, None);
    }

    #[tokio::test]
    async fn undo_with_nothing_pending_is_a_noop() {
        let backend = Arc::new(FakeBackend::new(vec![]));
        let cart = reconciler(backend.clone());

        cart.undo_removal().await.unwrap();

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn undo_after_the_window_is_a_noop() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        backend.seed(5, 3);
        let cart = CartReconciler::new(backend.clone(), Arc::new(NullBadgeSink), Duration::ZERO);
        cart.refresh().await.unwrap();

        cart.remove_item(5).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let calls_before = backend.calls().len();

        cart.undo_removal().await.unwrap();

        assert_eq!(backend.calls().len(), calls_before);
        assert!(cart.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn a_newer_removal_is_the_only_undoable_one() {
        let backend = Arc::new(FakeBackend::new(vec![
            (5, "Tomatoes", 3.5, 10),
            (8, "Cucumbers", 2.0, 10),
        ]));
        backend.seed(5, 3);
        backend.seed(8, 1);
        let cart = reconciler(backend.clone());
        cart.refresh().await.unwrap();

        cart.remove_item(5).await.unwrap();
        cart.remove_item(8).await.unwrap();

        assert_eq!(
            cart.pending_undo().await,
            Some(PendingUndo {
                product_id: 8,
                quantity: 1
            })
        );
    }

    #[tokio::test]
    async fn non_removal_mutations_discard_the_pending_undo() {
        let backend = Arc::new(FakeBackend::new(vec![
            (5, "Tomatoes", 3.5, 10),
            (8, "Cucumbers", 2.0, 10),
        ]));
        backend.seed(5, 3);
        let cart = reconciler(backend.clone());
        cart.refresh().await.unwrap();

        cart.remove_item(5).await.unwrap();
        assert!(cart.pending_undo().await.is_some());

        cart.add_item(8, 1, 10).await.unwrap();

        assert_eq!(cart.pending_undo().await, None);
    }

    #[tokio::test]
    async fn a_failed_remove_leaves_no_pending_undo() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        backend.seed(5, 3);
        let cart = reconciler(backend.clone());
        cart.refresh().await.unwrap();

        backend.fail_mutations.store(true, Ordering::SeqCst);
        let result = cart.remove_item(5).await;

        assert!(matches!(result, Err(CartError::Remote(_))));
        // The line is still in the cart, so there is nothing to undo.
        assert_eq!(cart.pending_undo().await, None);
        assert_eq!(cart.snapshot().await.line(5).unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn clear_applies_the_empty_snapshot_without_a_refetch() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        backend.seed(5, 3);
        let badges = Arc::new(RecordingBadges::new());
        let cart = CartReconciler::new(backend.clone(), badges.clone(), Duration::from_secs(10));
        cart.refresh().await.unwrap();

        cart.clear().await.unwrap();

        assert!(cart.snapshot().await.is_empty());
        assert_eq!(backend.calls().last().unwrap(), "clear");
        assert_eq!(badges.cart_counts.lock().unwrap().last(), Some(&0));
    }

    #[tokio::test]
    async fn remote_failure_leaves_the_snapshot_untouched() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        backend.seed(5, 3);
        let cart = reconciler(backend.clone());
        cart.refresh().await.unwrap();
        let before = cart.snapshot().await;

        backend.fail_mutations.store(true, Ordering::SeqCst);
        let result = cart.add_item(5, 1, 10).await;

        assert!(matches!(result, Err(CartError::Remote(_))));
        assert_eq!(cart.snapshot().await, before);
    }

    #[tokio::test]
    async fn published_snapshots_respect_the_quantity_invariant() {
        let backend = Arc::new(FakeBackend::new(vec![
            (5, "Tomatoes", 3.5, 10),
            (8, "Cucumbers", 2.0, 4),
        ]));
        let cart = reconciler(backend.clone());

        cart.add_item(5, 2, 10).await.unwrap();
        cart.add_item(8, 4, 4).await.unwrap();
        cart.set_quantity(5, 10).await.unwrap();

        for line in cart.snapshot().await.lines() {
            assert!(line.quantity >= 1);
            assert!(line.quantity <= line.product.stock);
        }
    }

    #[tokio::test]
    async fn a_stale_refetch_never_overwrites_a_newer_snapshot() {
        let backend = Arc::new(FakeBackend::new(vec![(5, "Tomatoes", 3.5, 10)]));
        let cart = reconciler(backend.clone());

        let older = cart.fence.issue();
        let newer = cart.fence.issue();

        let newer_snapshot = CartSnapshot::from(CartPayload {
            items: vec![CartItemPayload {
                id: 1,
                product_id: 5,
                quantity: 4,
                product: None,
            }],
        });
        cart.apply(newer, newer_snapshot.clone()).await;

        // The slower, older response arrives last and must be dropped.
        let older_snapshot = CartSnapshot::from(CartPayload {
            items: vec![CartItemPayload {
                id: 1,
                product_id: 5,
                quantity: 1,
                product: None,
            }],
        });
        cart.apply(older, older_snapshot).await;

        assert_eq!(cart.snapshot().await, newer_snapshot);
    }

    #[tokio::test]
    async fn end_to_end_total_formats_to_two_decimals() {
        let backend = Arc::new(FakeBackend::new(vec![(1, "Apples", 10.0, 50)]));
        let cart = reconciler(backend.clone());

        cart.add_item(1, 2, 50).await.unwrap();

        assert_eq!(cart.snapshot().await.total_display(), "20.00");
    }
}
