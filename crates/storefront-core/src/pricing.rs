//! # Line Pricing
//!
//! Computes the discounted subtotal of a single cart line.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product { price: 10000, stock: 20, tiers: [{10,10%},{20,20%}] }        │
//! │  quantity: 10                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve_rate(tiers, 10) = 10%                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal = floor(10000 × 10 × (1 − 0.10)) = 90,000                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricedLine { unitPrice: 10000, quantity: 10, rate: 10%, 90000 }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure computation: stock is read-only here; the cart aggregate enforces
//! the ceiling at mutation time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::resolve_rate;
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{DiscountTier, Product};
use crate::validation::validate_quantity;
use crate::CoreError;

// =============================================================================
// Priced Line
// =============================================================================

/// A fully priced cart line, ready for rendering.
///
/// This is the line-level slice of the cart snapshot the UI collaborator
/// consumes; all fields are plain values, already computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricedLine {
    /// Product this line references.
    pub product_id: String,

    /// Product name at pricing time.
    pub name: String,

    /// Unit price in minor units.
    pub unit_price_cents: i64,

    /// Line quantity.
    pub quantity: i64,

    /// Effective tier discount in basis points (0 if no tier qualified).
    pub discount_rate_bps: u32,

    /// Discounted line subtotal: floor(unit × qty × (1 − rate)).
    pub subtotal_cents: i64,
}

impl PricedLine {
    /// Prices a line whose invariants already hold (quantity >= 1).
    ///
    /// Used by the cart aggregate, which guarantees its lines are valid;
    /// external callers go through [`price_line`] instead.
    pub(crate) fn compute(
        product_id: &str,
        name: &str,
        unit_price: Money,
        quantity: i64,
        tiers: &[DiscountTier],
    ) -> Self {
        let rate = resolve_rate(tiers, quantity);
        let subtotal = unit_price.multiply_quantity(quantity).apply_discount_rate(rate);

        PricedLine {
            product_id: product_id.to_string(),
            name: name.to_string(),
            unit_price_cents: unit_price.cents(),
            quantity,
            discount_rate_bps: rate.bps(),
            subtotal_cents: subtotal.cents(),
        }
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Line Pricing Entry Point
// =============================================================================

/// Prices `quantity` units of `product`.
///
/// ## Errors
/// - Quantity below 1 → validation error
/// - Quantity above the product's stock → [`CoreError::StockExceeded`];
///   the caller decides whether to clamp (the cart's `add` path) or to
///   reject outright (explicit quantity edits)
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use storefront_core::money::DiscountRate;
/// use storefront_core::pricing::price_line;
/// use storefront_core::types::{DiscountTier, Product};
///
/// let product = Product {
///     id: "p1".into(),
///     name: "상품1".into(),
///     description: None,
///     price_cents: 10_000,
///     stock: 20,
///     discounts: vec![
///         DiscountTier::new(10, DiscountRate::from_bps(1000)),
///         DiscountTier::new(20, DiscountRate::from_bps(2000)),
///     ],
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
///
/// let line = price_line(&product, 10).unwrap();
/// assert_eq!(line.subtotal_cents, 90_000);
/// ```
pub fn price_line(product: &Product, quantity: i64) -> CoreResult<PricedLine> {
    validate_quantity(quantity)?;

    if quantity > product.stock {
        return Err(CoreError::StockExceeded {
            product_id: product.id.clone(),
            stock: product.stock,
            requested: quantity,
        });
    }

    Ok(PricedLine::compute(
        &product.id,
        &product.name,
        product.price(),
        quantity,
        &product.discounts,
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::DiscountRate;
    use chrono::Utc;

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

    #[test]
    fn test_scenario_a_tier_discount_applies() {
        // 10000 × 10 × 0.9 = 90,000
        let line = price_line(&tiered_product(), 10).unwrap();
        assert_eq!(line.discount_rate_bps, 1000);
        assert_eq!(line.subtotal_cents, 90_000);
    }

    #[test]
    fn test_full_stock_hits_top_tier() {
        // 10000 × 20 × 0.8 = 160,000 (Scenario B after the cart clamps 25 → 20)
        let line = price_line(&tiered_product(), 20).unwrap();
        assert_eq!(line.discount_rate_bps, 2000);
        assert_eq!(line.subtotal_cents, 160_000);
    }

    #[test]
    fn test_no_tier_below_threshold() {
        let line = price_line(&tiered_product(), 5).unwrap();
        assert_eq!(line.discount_rate_bps, 0);
        assert_eq!(line.subtotal_cents, 50_000);
    }

    #[test]
    fn test_over_stock_rejected() {
        let err = price_line(&tiered_product(), 25).unwrap_err();
        assert!(matches!(
            err,
            CoreError::StockExceeded {
                stock: 20,
                requested: 25,
                ..
            }
        ));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        assert!(price_line(&tiered_product(), 0).is_err());
        assert!(price_line(&tiered_product(), -3).is_err());
    }

    #[test]
    fn test_subtotal_floors() {
        let mut product = tiered_product();
        product.price_cents = 333;
        product.discounts = vec![DiscountTier::new(2, DiscountRate::from_bps(1500))];

        // 333 × 3 = 999; 999 × 0.85 = 849.15 → floors to 849
        let line = price_line(&product, 3).unwrap();
        assert_eq!(line.subtotal_cents, 849);
    }

    #[test]
    fn test_snapshot_line_serializes_camel_case() {
        let line = price_line(&tiered_product(), 10).unwrap();
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["discountRateBps"], 1000);
        assert_eq!(json["subtotalCents"], 90_000);
    }
}
