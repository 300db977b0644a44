//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  DiscountTier   │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (string)    │   │  min_quantity   │   │  code (unique)  │       │
//! │  │  name           │   │  rate (bps)     │   │  name           │       │
//! │  │  price_cents    │   └─────────────────┘   │  discount_type  │       │
//! │  │  stock          │                         │  discount_value │       │
//! │  │  discounts[]    │   ┌─────────────────┐   └─────────────────┘       │
//! │  └─────────────────┘   │  DiscountType   │                             │
//! │                        │  ─────────────  │                             │
//! │                        │  Amount         │                             │
//! │                        │  Percentage     │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - Product `id` is an opaque unique string. Seed data uses short ids
//!   ("p1"); the admin surface generates UUID v4 strings.
//! - Coupon identity is its `code`, compared **case-sensitively**.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{DiscountRate, Money};

// =============================================================================
// Discount Tier
// =============================================================================

/// One row of a product's quantity-tier table.
///
/// "Buy `min_quantity` or more, get `rate` off the whole line."
/// Tiers are kept sorted ascending by `min_quantity`; only the highest
/// qualifying tier applies (non-cumulative). See [`crate::discount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountTier {
    /// Minimum line quantity for this tier to qualify.
    pub min_quantity: i64,

    /// Discount rate applied to the line when this tier is selected.
    pub rate: DiscountRate,
}

impl DiscountTier {
    /// Creates a tier row.
    #[inline]
    pub const fn new(min_quantity: i64, rate: DiscountRate) -> Self {
        DiscountTier { min_quantity, rate }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the storefront.
///
/// Once a cart line references a product, everything except `stock` is
/// treated as immutable; stock is a ceiling checked at quantity-change
/// time rather than a separately mutated ledger.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (opaque string).
    pub id: String,

    /// Display name shown in the shop and the admin list.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Unit price in minor units. Always positive.
    pub price_cents: i64,

    /// Current stock level. Never negative.
    pub stock: i64,

    /// Quantity-tier discount table, ascending by `min_quantity`.
    pub discounts: Vec<DiscountTier>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the product has any stock left to sell.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DiscountType {
    /// Flat amount off the cart total, in minor units.
    Amount,
    /// Percentage off the cart total (value is 0-100).
    Percentage,
}

// =============================================================================
// Coupon
// =============================================================================

/// A coupon the shopper can apply to the cart total.
///
/// ## Two Independent Lifecycles
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Existence:  admin registers/deletes coupons in the CouponBook          │
/// │  Selection:  the cart holds at most ONE applied coupon reference        │
/// │                                                                         │
/// │  Deleting a coupon from the book also deselects it if applied,         │
/// │  but applying/clearing never mutates the book.                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The coupon discount is always computed on the **post-line-discount**
/// total, never on individual lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Coupon {
    /// Unique code, compared case-sensitively ("PERCENT10" != "percent10").
    pub code: String,

    /// Display name shown next to the applied coupon.
    pub name: String,

    /// Interpretation of `discount_value`.
    pub discount_type: DiscountType,

    /// Positive discount value: minor units for Amount, 0-100 for Percentage.
    pub discount_value: i64,
}

impl Coupon {
    /// Creates a flat-amount coupon.
    pub fn amount(code: impl Into<String>, name: impl Into<String>, value_cents: i64) -> Self {
        Coupon {
            code: code.into(),
            name: name.into(),
            discount_type: DiscountType::Amount,
            discount_value: value_cents,
        }
    }

    /// Creates a percentage coupon.
    pub fn percentage(code: impl Into<String>, name: impl Into<String>, percent: i64) -> Self {
        Coupon {
            code: code.into(),
            name: name.into(),
            discount_type: DiscountType::Percentage,
            discount_value: percent,
        }
    }

    /// Checks if this is a percentage coupon (subject to the minimum-total
    /// policy, see [`crate::coupon::CouponPolicy`]).
    #[inline]
    pub fn is_percentage(&self) -> bool {
        self.discount_type == DiscountType::Percentage
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
