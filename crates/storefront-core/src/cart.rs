//! # Cart Aggregate
//!
//! Owns the cart lines, mediates quantity changes against stock, and
//! composes line pricing with the coupon applier into a final total.
//!
//! ## Per-Line State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 States per product id: {absent, present(qty)}           │
//! │                                                                         │
//! │  add_product(p, q)     absent  ──► present(min(q, stock))              │
//! │                        present ──► present(min(cur+q, stock))          │
//! │                        (clamped silently, never over stock)            │
//! │                                                                         │
//! │  set_quantity(id, q)   q ≤ 0      ──► absent (remove)                  │
//! │                        q > stock  ──► REJECTED, line unchanged         │
//! │                        otherwise  ──► present(q)                       │
//! │                                                                         │
//! │  remove_product(id)    present ──► absent (idempotent on absent)       │
//! │                                                                         │
//! │  apply/clear_coupon    cart-level applied-coupon reference only        │
//! │  clear()               all lines absent, coupon cleared                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recompute-on-Read
//! Totals are derived on every [`Cart::snapshot`] call by summing line
//! subtotals and delegating to the coupon applier. Nothing is cached, so
//! there is nothing to invalidate; carts are small and the O(lines) work
//! per read is irrelevant.
//!
//! ## Add Clamps, Set Rejects
//! The reference storefront silently clamps an over-stock `add` but
//! rejects an over-stock explicit quantity edit. The asymmetry is
//! preserved here as observed behavior.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::{apply_coupon, CouponPolicy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::PricedLine;
use crate::types::{Coupon, DiscountTier, Product};
use crate::validation::validate_quantity;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One product and its requested quantity within the cart.
///
/// ## Frozen Pricing Snapshot
/// The line freezes the product's pricing-relevant data (name, unit
/// price, tier table, stock ceiling) at add time. The catalog may change
/// afterwards; the cart keeps displaying and pricing what the shopper
/// actually selected.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product ID this line references (non-owning).
    pub product_id: String,

    /// Product name at add time (frozen).
    pub name: String,

    /// Unit price in minor units at add time (frozen).
    pub unit_price_cents: i64,

    /// Stock ceiling at add time (frozen).
    pub stock: i64,

    /// Tier table at add time (frozen).
    pub discounts: Vec<DiscountTier>,

    /// Quantity in cart. Always 1..=stock.
    pub quantity: i64,

    /// When this line was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            stock: product.stock,
            discounts: product.discounts.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Prices this line with the tier resolver. Infallible: the aggregate
    /// keeps `quantity` within 1..=stock.
    pub fn priced(&self) -> PricedLine {
        PricedLine::compute(
            &self.product_id,
            &self.name,
            Money::from_cents(self.unit_price_cents),
            self.quantity,
            &self.discounts,
        )
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// An immutable, fully computed view of the cart for rendering.
///
/// This is the engine's output boundary: the UI collaborator renders it,
/// the persistence collaborator may serialize it. All totals are already
/// computed; nothing here is recomputed client-side.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    /// Priced lines in insertion order.
    pub lines: Vec<PricedLine>,

    /// Sum of all line quantities (the cart badge number).
    pub total_item_count: i64,

    /// Sum of discounted line subtotals, before the coupon.
    pub pre_coupon_total_cents: i64,

    /// Total after the applied coupon, floored at zero.
    pub post_coupon_total_cents: i64,

    /// Discount granted by the coupon (pre − post).
    pub coupon_discount_cents: i64,

    /// The coupon currently applied, if any.
    pub applied_coupon: Option<Coupon>,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart aggregate.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - Line quantity is positive and never exceeds the stock ceiling
/// - At most one applied coupon
/// - Maximum distinct lines: [`MAX_CART_LINES`]
///
/// Created per shopping session, mutated by the operations below, and
/// discarded (or cleared) at checkout. Checkout/order persistence is an
/// external concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order.
    lines: Vec<CartLine>,

    /// The single selected coupon, independent of the coupon book.
    applied_coupon: Option<Coupon>,

    /// When the cart was created/last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            applied_coupon: None,
            created_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Line Transitions
    // -------------------------------------------------------------------------

    /// Adds `quantity` units of `product`, merging into an existing line.
    ///
    /// ## Behavior
    /// - Already present: quantity grows, **silently clamped** to stock
    /// - Absent: new line with min(quantity, stock)
    ///
    /// ## Errors
    /// - Product out of stock, or line already at the ceiling, so nothing
    ///   can be added → [`CoreError::StockExceeded`]
    /// - Cart already holds [`MAX_CART_LINES`] lines → `CartTooLarge`
    /// - Result would exceed [`MAX_LINE_QUANTITY`] → `QuantityTooLarge`
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            if line.quantity >= line.stock {
                return Err(CoreError::StockExceeded {
                    product_id: product.id.clone(),
                    stock: line.stock,
                    requested: line.quantity + quantity,
                });
            }

            let clamped = (line.quantity + quantity).min(line.stock);
            if clamped > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: clamped,
                    max: MAX_LINE_QUANTITY,
                });
            }

            line.quantity = clamped;
            return Ok(());
        }

        if product.stock <= 0 {
            return Err(CoreError::StockExceeded {
                product_id: product.id.clone(),
                stock: product.stock,
                requested: quantity,
            });
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        let clamped = quantity.min(product.stock);
        if clamped > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: clamped,
                max: MAX_LINE_QUANTITY,
            });
        }

        self.lines.push(CartLine::from_product(product, clamped));
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: the line is removed (same as `remove_product`)
    /// - `quantity > stock`: **rejected**, line unchanged - unlike `add`,
    ///   which clamps
    ///
    /// ## Errors
    /// [`CoreError::StockExceeded`], [`CoreError::LineNotFound`],
    /// [`CoreError::QuantityTooLarge`]
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove_product(product_id);
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| CoreError::LineNotFound(product_id.to_string()))?;

        if quantity > line.stock {
            return Err(CoreError::StockExceeded {
                product_id: product_id.to_string(),
                stock: line.stock,
                requested: quantity,
            });
        }

        line.quantity = quantity;
        Ok(())
    }

    /// Removes the line for `product_id`, regardless of quantity.
    ///
    /// Idempotent: removing an absent product is a no-op, not an error.
    /// Returns whether a line was actually removed.
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != initial_len
    }

    // -------------------------------------------------------------------------
    // Coupon Selection
    // -------------------------------------------------------------------------

    /// Selects `coupon` as the cart's applied coupon.
    ///
    /// Validates the selection against `policy` (percentage coupons below
    /// the minimum total are rejected). Replaces any previously applied
    /// coupon. Does not touch lines and does not mutate the coupon book.
    pub fn apply_coupon(&mut self, coupon: &Coupon, policy: &CouponPolicy) -> CoreResult<()> {
        policy.check(coupon, self.pre_coupon_total())?;
        self.applied_coupon = Some(coupon.clone());
        Ok(())
    }

    /// Deselects the applied coupon, if any.
    pub fn clear_coupon(&mut self) {
        self.applied_coupon = None;
    }

    /// Returns the currently applied coupon.
    pub fn applied_coupon(&self) -> Option<&Coupon> {
        self.applied_coupon.as_ref()
    }

    /// Clears all lines and the applied coupon.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.applied_coupon = None;
        self.created_at = Utc::now();
    }

    // -------------------------------------------------------------------------
    // Derived Totals (recomputed on every call)
    // -------------------------------------------------------------------------

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the sum of all line quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of discounted line subtotals, before the coupon (I4: the
    /// coupon never sees individual lines).
    pub fn pre_coupon_total(&self) -> Money {
        self.lines
            .iter()
            .map(|l| l.priced().subtotal())
            .fold(Money::zero(), |acc, subtotal| acc + subtotal)
    }

    /// Produces the immutable snapshot the rendering collaborator consumes.
    pub fn snapshot(&self) -> CartSnapshot {
        let lines: Vec<PricedLine> = self.lines.iter().map(CartLine::priced).collect();
        let pre_coupon_total = lines
            .iter()
            .map(PricedLine::subtotal)
            .fold(Money::zero(), |acc, subtotal| acc + subtotal);

        let outcome = apply_coupon(self.applied_coupon.as_ref(), pre_coupon_total);

        CartSnapshot {
            lines,
            total_item_count: self.total_quantity(),
            pre_coupon_total_cents: pre_coupon_total.cents(),
            post_coupon_total_cents: outcome.post_total.cents(),
            coupon_discount_cents: outcome.applied_discount.cents(),
            applied_coupon: self.applied_coupon.clone(),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::DiscountRate;

    fn tiered_product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "상품1".to_string(),
            description: None,
            price_cents: 10_000,
            stock: 20,
            discounts: vec![
                DiscountTier::new(10, DiscountRate::from_bps(1000)),
                DiscountTier::new(20, DiscountRate::from_bps(2000)),
            ],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn plain_product(id: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: None,
            price_cents,
            stock,
            discounts: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_and_snapshot_scenario_a() {
        let mut cart = Cart::new();
        cart.add_product(&tiered_product(), 10).unwrap();

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.total_item_count, 10);
        assert_eq!(snapshot.pre_coupon_total_cents, 90_000);
        assert_eq!(snapshot.post_coupon_total_cents, 90_000);
    }

    #[test]
    fn test_scenario_b_add_clamps_to_stock_silently() {
        let mut cart = Cart::new();
        // 25 requested, 20 in stock: clamped without error
        cart.add_product(&tiered_product(), 25).unwrap();

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.lines[0].quantity, 20);
        // 10000 × 20 × 0.8 = 160,000
        assert_eq!(snapshot.pre_coupon_total_cents, 160_000);
    }

    #[test]
    fn test_scenario_e_same_product_merges() {
        let mut cart = Cart::new();
        let product = tiered_product();

        cart.add_product(&product, 1).unwrap();
        cart.add_product(&product, 1).unwrap();

        assert_eq!(cart.line_count(), 1); // one line, not two
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_merge_clamps_at_ceiling() {
        let mut cart = Cart::new();
        let product = tiered_product();

        cart.add_product(&product, 15).unwrap();
        cart.add_product(&product, 15).unwrap(); // 30 → clamped to 20

        assert_eq!(cart.lines()[0].quantity, 20);

        // At the ceiling nothing more can be added
        let err = cart.add_product(&product, 1).unwrap_err();
        assert!(matches!(err, CoreError::StockExceeded { stock: 20, .. }));
        assert_eq!(cart.lines()[0].quantity, 20);
    }

    #[test]
    fn test_add_out_of_stock_rejected() {
        let mut cart = Cart::new();
        let sold_out = plain_product("p9", 5_000, 0);

        let err = cart.add_product(&sold_out, 1).unwrap_err();
        assert!(matches!(err, CoreError::StockExceeded { stock: 0, .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_rejects_over_stock() {
        let mut cart = Cart::new();
        cart.add_product(&tiered_product(), 10).unwrap();

        // Explicit set above stock is rejected, unlike add which clamps
        let err = cart.set_quantity("p1", 25).unwrap_err();
        assert!(matches!(
            err,
            CoreError::StockExceeded {
                stock: 20,
                requested: 25,
                ..
            }
        ));
        assert_eq!(cart.lines()[0].quantity, 10); // line unchanged
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_product(&tiered_product(), 5).unwrap();

        cart.set_quantity("p1", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_absent_line() {
        let mut cart = Cart::new();
        let err = cart.set_quantity("ghost", 3).unwrap_err();
        assert!(matches!(err, CoreError::LineNotFound(_)));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_product(&tiered_product(), 5).unwrap();

        assert!(cart.remove_product("p1"));
        // P4: removing an absent product is a no-op, not an error
        assert!(!cart.remove_product("p1"));
        assert!(!cart.remove_product("never-added"));
    }

    #[test]
    fn test_stock_ceiling_survives_mutation_sequences() {
        // P2: no sequence of add/set calls puts a line above its stock
        let mut cart = Cart::new();
        let product = plain_product("p2", 1_000, 7);

        cart.add_product(&product, 3).unwrap();
        cart.add_product(&product, 10).unwrap(); // clamp to 7
        let _ = cart.set_quantity("p2", 9); // rejected
        cart.set_quantity("p2", 5).unwrap();
        cart.add_product(&product, 100).unwrap(); // clamp back to 7

        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_coupon_applies_to_post_line_discount_total() {
        // I4: the coupon sees the already-discounted total, never lines
        let mut cart = Cart::new();
        cart.add_product(&tiered_product(), 10).unwrap(); // 90,000 after tier

        let coupon = Coupon::amount("AMOUNT5000", "5000원 할인", 5000);
        cart.apply_coupon(&coupon, &CouponPolicy::default()).unwrap();

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.pre_coupon_total_cents, 90_000);
        assert_eq!(snapshot.post_coupon_total_cents, 85_000);
        assert_eq!(snapshot.coupon_discount_cents, 5_000);
        assert_eq!(snapshot.applied_coupon.unwrap().code, "AMOUNT5000");
    }

    #[test]
    fn test_percentage_coupon_below_minimum_rejected() {
        let mut cart = Cart::new();
        cart.add_product(&plain_product("p3", 3_000, 10), 1).unwrap();

        let coupon = Coupon::percentage("PERCENT10", "10% 할인", 10);
        let err = cart
            .apply_coupon(&coupon, &CouponPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::CouponBelowMinimum { .. }));
        assert!(cart.applied_coupon().is_none());
    }

    #[test]
    fn test_degenerate_percentage_floors_total_at_zero() {
        // Scenario D at the aggregate level, policy switched off
        let mut cart = Cart::new();
        cart.add_product(&plain_product("p3", 3_000, 10), 1).unwrap();

        let broken = Coupon::percentage("BROKEN", "degenerate", 200);
        cart.apply_coupon(&broken, &CouponPolicy::unrestricted())
            .unwrap();

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.post_coupon_total_cents, 0); // P3: never negative
    }

    #[test]
    fn test_applied_coupon_replaced_not_stacked() {
        let mut cart = Cart::new();
        cart.add_product(&tiered_product(), 10).unwrap();
        let policy = CouponPolicy::default();

        cart.apply_coupon(&Coupon::amount("A", "a", 1_000), &policy)
            .unwrap();
        cart.apply_coupon(&Coupon::amount("B", "b", 2_000), &policy)
            .unwrap();

        assert_eq!(cart.applied_coupon().unwrap().code, "B");
        assert_eq!(cart.snapshot().post_coupon_total_cents, 88_000);
    }

    #[test]
    fn test_clear_resets_lines_and_coupon() {
        let mut cart = Cart::new();
        cart.add_product(&tiered_product(), 5).unwrap();
        cart.apply_coupon(&Coupon::amount("A", "a", 1_000), &CouponPolicy::default())
            .unwrap();

        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.applied_coupon().is_none());
        let snapshot = cart.snapshot();
        assert_eq!(snapshot.pre_coupon_total_cents, 0);
        assert_eq!(snapshot.post_coupon_total_cents, 0);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_product(&plain_product("b", 1_000, 5), 1).unwrap();
        cart.add_product(&plain_product("a", 2_000, 5), 1).unwrap();
        cart.add_product(&plain_product("c", 3_000, 5), 1).unwrap();

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut cart = Cart::new();
        cart.add_product(&tiered_product(), 10).unwrap();

        let json = serde_json::to_value(cart.snapshot()).unwrap();
        assert_eq!(json["totalItemCount"], 10);
        assert_eq!(json["preCouponTotalCents"], 90_000);
        assert_eq!(json["postCouponTotalCents"], 90_000);
        assert!(json["appliedCoupon"].is_null());
    }
}
