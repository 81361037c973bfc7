use crate::models::{CartItemPayload, CartPayload};

// ============================================================================
// Cart Value Objects
// ============================================================================
//
// The local mirror of the server-owned cart. A snapshot is replaced
// wholesale after every confirmed mutation and never patched in place, so
// whatever it holds is exactly what the backend last said.
//
// ============================================================================

/// Backend product identifier.
pub type ProductId = i64;

/// Product details the backend joins onto each cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

impl ProductInfo {
    /// Stand-in for a line whose product was delisted between writes. The
    /// unbounded stock keeps the quantity guard from blocking a line we
    /// have no stock figure for.
    pub fn placeholder() -> Self {
        Self {
            name: "Unknown product".to_string(),
            price: 0.0,
            stock: u32::MAX,
        }
    }
}

/// One line of the cart as last confirmed by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub line_id: i64,
    pub product_id: ProductId,
    pub quantity: u32,
    pub product: ProductInfo,
}

impl CartLine {
    /// Line subtotal; a pure projection, never stored.
    pub fn subtotal(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

/// Full authoritative cart state from the last successful remote fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units across all lines; this is the cart badge number.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Cart total in currency units. Recomputed on demand, never cached.
    pub fn total(&self) -> f64 {
        // f64's Sum starts from -0.0, which would render an empty cart as
        // "-0.00"; folding from positive zero keeps the display sane.
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .fold(0.0, |total, subtotal| total + subtotal)
    }

    /// Cart total formatted for display, two decimal places.
    pub fn total_display(&self) -> String {
        format!("{:.2}", self.total())
    }
}

impl From<CartPayload> for CartSnapshot {
    fn from(payload: CartPayload) -> Self {
        Self {
            lines: payload.items.into_iter().map(CartLine::from).collect(),
        }
    }
}

impl From<CartItemPayload> for CartLine {
    fn from(item: CartItemPayload) -> Self {
        let product = item
            .product
            .map(|product| ProductInfo {
                name: product.name,
                price: product.price,
                stock: product.stock,
            })
            .unwrap_or_else(ProductInfo::placeholder);
        Self {
            line_id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            product,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductPayload;

    fn line(product_id: ProductId, quantity: u32, price: f64) -> CartLine {
        CartLine {
            line_id: product_id * 10,
            product_id,
            quantity,
            product: ProductInfo {
                name: format!("Product {product_id}"),
                price,
                stock: 100,
            },
        }
    }

    #[test]
    fn total_display_rounds_to_two_decimals() {
        let snapshot = CartSnapshot {
            lines: vec![line(1, 2, 10.0)],
        };
        assert_eq!(snapshot.total_display(), "20.00");

        let snapshot = CartSnapshot {
            lines: vec![line(1, 3, 3.333)],
        };
        assert_eq!(snapshot.total_display(), "10.00");
    }

    #[test]
    fn totals_sum_across_lines() {
        let snapshot = CartSnapshot {
            lines: vec![line(1, 2, 10.0), line(2, 1, 4.5)],
        };
        assert_eq!(snapshot.total(), 24.5);
        assert_eq!(snapshot.total_quantity(), 3);
    }

    #[test]
    fn empty_snapshot_has_zero_projections() {
        let snapshot = CartSnapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_quantity(), 0);
        assert!(snapshot.total().is_sign_positive());
        assert_eq!(snapshot.total_display(), "0.00");
    }

    #[test]
    fn missing_product_snapshot_gets_the_placeholder() {
        let line = CartLine::from(CartItemPayload {
            id: 1,
            product_id: 7,
            quantity: 2,
            product: None,
        });

        assert_eq!(line.product.name, "Unknown product");
        assert_eq!(line.product.price, 0.0);
        assert_eq!(line.product.stock, u32::MAX);
        assert_eq!(line.subtotal(), 0.0);
    }

    #[test]
    fn payload_conversion_preserves_line_order() {
        let payload = CartPayload {
            items: vec![
                CartItemPayload {
                    id: 10,
                    product_id: 5,
                    quantity: 3,
                    product: Some(ProductPayload {
                        name: "Tomatoes".to_string(),
                        price: 3.5,
                        stock: 8,
                    }),
                },
                CartItemPayload {
                    id: 11,
                    product_id: 2,
                    quantity: 1,
                    product: None,
                },
            ],
        };

        let snapshot = CartSnapshot::from(payload);
        let ids: Vec<ProductId> = snapshot.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![5, 2]);
        assert_eq!(snapshot.line(5).unwrap().product.stock, 8);
    }
}
