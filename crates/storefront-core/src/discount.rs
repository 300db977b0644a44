//! # Discount Resolver
//!
//! Resolves a product's quantity-tier table to the rate that applies to a
//! given line quantity.
//!
//! ## Resolution Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tier table (ascending by minQuantity):                                 │
//! │                                                                         │
//! │    { minQuantity: 10, rate: 10% }                                       │
//! │    { minQuantity: 20, rate: 20% }                                       │
//! │                                                                         │
//! │  quantity:  1..9   → 0%    (no tier qualifies)                          │
//! │  quantity: 10..19  → 10%   (highest qualifying tier)                    │
//! │  quantity: 20..    → 20%                                                │
//! │                                                                         │
//! │  NON-CUMULATIVE: the best tier wins, rates never stack.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure function, no side effects, deterministic.

use crate::money::DiscountRate;
use crate::types::DiscountTier;

/// Returns the discount rate for `quantity` against a tier table.
///
/// Among all tiers with `min_quantity <= quantity`, the one with the
/// greatest `min_quantity` wins. If no tier qualifies, the rate is zero.
///
/// The table is kept sorted ascending by `min_quantity` (enforced by
/// [`crate::validation::validate_discount_tiers`] at the admin boundary),
/// so the last qualifying tier is the winner.
///
/// ## Example
/// ```rust
/// use storefront_core::discount::resolve_rate;
/// use storefront_core::money::DiscountRate;
/// use storefront_core::types::DiscountTier;
///
/// let tiers = vec![
///     DiscountTier::new(10, DiscountRate::from_bps(1000)),
///     DiscountTier::new(20, DiscountRate::from_bps(2000)),
/// ];
///
/// assert_eq!(resolve_rate(&tiers, 9).bps(), 0);
/// assert_eq!(resolve_rate(&tiers, 10).bps(), 1000);
/// assert_eq!(resolve_rate(&tiers, 25).bps(), 2000);
/// ```
pub fn resolve_rate(tiers: &[DiscountTier], quantity: i64) -> DiscountRate {
    tiers
        .iter()
        .rev()
        .find(|tier| tier.min_quantity <= quantity)
        .map(|tier| tier.rate)
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
