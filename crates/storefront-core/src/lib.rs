//! # storefront-core: Pure Pricing Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart
//! pricing engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Frontend (React)                           │   │
//! │  │    Shop UI ──► Cart UI ──► Coupon UI ──► Admin UI              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ in-process calls                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   storefront-session                            │   │
//! │  │    add_to_cart, apply_coupon, create_product, etc.             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  money   │ │ discount │ │  pricing/coupon  │  │   │
//! │  │   │ Product  │ │  Money   │ │  tiers   │ │  line subtotals  │  │   │
//! │  │   │  Coupon  │ │  rates   │ │ resolver │ │  coupon applier  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐                       │   │
//! │  │   │   cart   │ │ catalog  │ │validation│                       │   │
//! │  │   │aggregate │ │registries│ │  rules   │                       │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘                       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, DiscountTier, Coupon)
//! - [`money`] - Money and discount-rate types with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`discount`] - Tiered discount resolution
//! - [`pricing`] - Per-line subtotal computation
//! - [`coupon`] - Coupon validation and application
//! - [`cart`] - The cart aggregate and its snapshot
//! - [`catalog`] - Product catalog and coupon book registries
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every computation is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Monetary values are minor units (i64), rates are basis
//!    points (u32) - no floating point in any total
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Recompute-on-read**: Totals are derived on every snapshot, never cached
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::discount::resolve_rate;
//! use storefront_core::types::DiscountTier;
//! use storefront_core::money::DiscountRate;
//!
//! // 10+ units: 10% off, 20+ units: 20% off
//! let tiers = vec![
//!     DiscountTier::new(10, DiscountRate::from_bps(1000)),
//!     DiscountTier::new(20, DiscountRate::from_bps(2000)),
//! ];
//!
//! // Only the highest qualifying tier applies (non-cumulative)
//! assert_eq!(resolve_rate(&tiers, 15).bps(), 1000);
//! assert_eq!(resolve_rate(&tiers, 20).bps(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod coupon;
pub mod discount;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use cart::{Cart, CartLine, CartSnapshot};
pub use catalog::{CouponBook, ProductCatalog, ProductUpdate};
pub use coupon::{CouponOutcome, CouponPolicy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use pricing::PricedLine;
pub use types::{Coupon, DiscountTier, DiscountType, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable checkout sizes.
/// Can be made configurable per store in future versions.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in a cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Stock is usually the binding ceiling; this is the absolute one.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Default minimum pre-coupon total for percentage coupons, in minor units
///
/// ## Business Reason
/// Percentage coupons on tiny totals round to nothing and confuse shoppers;
/// the reference storefront only accepts them from 10,000 minor units up.
/// Configurable through [`coupon::CouponPolicy`].
pub const PERCENTAGE_COUPON_MIN_TOTAL_CENTS: i64 = 10_000;
