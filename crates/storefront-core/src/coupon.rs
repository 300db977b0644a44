//! # Coupon Validator/Applier
//!
//! Applies at most one coupon to a cart's post-line-discount total.
//!
//! ## Application Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pre-coupon total (line subtotals already discounted)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  none        → total unchanged, discount 0                      │   │
//! │  │  amount      → max(0, total − value)                            │   │
//! │  │  percentage  → floor(total × (1 − value/100)), clamped at 0     │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  post-coupon total (NEVER negative)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Distinct Responsibilities
//! - **Application** ([`apply_coupon`]): pure arithmetic, never fails.
//!   Degenerate inputs (percentage > 100, coupon bigger than the cart)
//!   clamp to a free cart instead of erroring.
//! - **Validation** ([`CouponPolicy::check`]): rejects a coupon *selection*
//!   (percentage coupons below the minimum total). Checked once at apply
//!   time; an already-applied coupon stays applied as lines change.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Coupon, DiscountType};
use crate::PERCENTAGE_COUPON_MIN_TOTAL_CENTS;

// =============================================================================
// Coupon Outcome
// =============================================================================

/// Result of applying a coupon (or none) to a pre-coupon total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouponOutcome {
    /// Total after the coupon discount, floored at zero.
    pub post_total: Money,

    /// The discount actually granted (`pre_total − post_total`).
    pub applied_discount: Money,
}

impl CouponOutcome {
    /// Outcome when no coupon is applied.
    pub fn unchanged(total: Money) -> Self {
        CouponOutcome {
            post_total: total,
            applied_discount: Money::zero(),
        }
    }
}

// =============================================================================
// Coupon Application
// =============================================================================

/// Applies `coupon` to `pre_total` and returns the outcome.
///
/// Pure computation; never fails:
/// - `None` → total unchanged, zero discount
/// - Amount larger than the total → free cart (post total 0)
/// - Percentage above 100 (degenerate admin input) → free cart
/// - Empty cart (`pre_total` = 0) → 0 with zero discount; not an error
///
/// ## Example
/// ```rust
/// use storefront_core::coupon::apply_coupon;
/// use storefront_core::money::Money;
/// use storefront_core::types::Coupon;
///
/// let coupon = Coupon::amount("AMOUNT5000", "5000원 할인", 5000);
/// let outcome = apply_coupon(Some(&coupon), Money::from_cents(90_000));
/// assert_eq!(outcome.post_total.cents(), 85_000);
/// assert_eq!(outcome.applied_discount.cents(), 5_000);
/// ```
pub fn apply_coupon(coupon: Option<&Coupon>, pre_total: Money) -> CouponOutcome {
    let coupon = match coupon {
        Some(coupon) => coupon,
        None => return CouponOutcome::unchanged(pre_total),
    };

    let post_total = match coupon.discount_type {
        DiscountType::Amount => {
            (pre_total - Money::from_cents(coupon.discount_value)).floor_zero()
        }
        DiscountType::Percentage => {
            // floor(total × (100 − value) / 100); values above 100 drive the
            // product negative and clamp to a free cart
            let remaining = 100i128 - coupon.discount_value as i128;
            let post = pre_total.cents() as i128 * remaining / 100;
            Money::from_cents(post.max(0) as i64).floor_zero()
        }
    };

    CouponOutcome {
        post_total,
        applied_discount: pre_total - post_total,
    }
}

// =============================================================================
// Coupon Policy
// =============================================================================

/// Store-level rules for which coupon *selections* are accepted.
///
/// ## Why a Policy Object?
/// The threshold is a domain rule of the store, not of any one coupon,
/// and tests need to switch it off; request-scoped configuration beats a
/// module-level global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouponPolicy {
    /// Minimum pre-coupon total required for percentage coupons.
    /// `None` disables the rule.
    pub percentage_min_total: Option<Money>,
}

impl CouponPolicy {
    /// Policy with no restrictions (used by tests and kiosk builds).
    pub const fn unrestricted() -> Self {
        CouponPolicy {
            percentage_min_total: None,
        }
    }

    /// Checks whether `coupon` may be applied to a cart totaling `pre_total`.
    ///
    /// ## Errors
    /// [`CoreError::CouponBelowMinimum`] for a percentage coupon on a total
    /// below the configured minimum. Amount coupons are always accepted,
    /// including on an empty cart.
    pub fn check(&self, coupon: &Coupon, pre_total: Money) -> CoreResult<()> {
        if let Some(minimum) = self.percentage_min_total {
            if coupon.is_percentage() && pre_total < minimum {
                return Err(CoreError::CouponBelowMinimum {
                    code: coupon.code.clone(),
                    minimum_cents: minimum.cents(),
                    total_cents: pre_total.cents(),
                });
            }
        }

        Ok(())
    }
}

/// Default policy: percentage coupons from 10,000 minor units up.
impl Default for CouponPolicy {
    fn default() -> Self {
        CouponPolicy {
            percentage_min_total: Some(Money::from_cents(PERCENTAGE_COUPON_MIN_TOTAL_CENTS)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_coupon_unchanged() {
        let outcome = apply_coupon(None, Money::from_cents(90_000));
        assert_eq!(outcome.post_total.cents(), 90_000);
        assert_eq!(outcome.applied_discount.cents(), 0);
    }

    #[test]
    fn test_scenario_c_amount_coupon() {
        // 90,000 − 5,000 = 85,000
        let coupon = Coupon::amount("AMOUNT5000", "5000원 할인", 5000);
        let outcome = apply_coupon(Some(&coupon), Money::from_cents(90_000));
        assert_eq!(outcome.post_total.cents(), 85_000);
        assert_eq!(outcome.applied_discount.cents(), 5_000);
    }

    #[test]
    fn test_amount_coupon_floors_at_zero() {
        // P3: post-coupon total is never negative
        let coupon = Coupon::amount("AMOUNT5000", "5000원 할인", 5000);
        let outcome = apply_coupon(Some(&coupon), Money::from_cents(3_000));
        assert_eq!(outcome.post_total.cents(), 0);
        assert_eq!(outcome.applied_discount.cents(), 3_000);
    }

    #[test]
    fn test_percentage_coupon() {
        let coupon = Coupon::percentage("PERCENT10", "10% 할인", 10);
        let outcome = apply_coupon(Some(&coupon), Money::from_cents(90_000));
        assert_eq!(outcome.post_total.cents(), 81_000);
        assert_eq!(outcome.applied_discount.cents(), 9_000);
    }

    #[test]
    fn test_percentage_coupon_floors_division() {
        // 9,999 × 10% off = 8,999.1 → floors to 8,999
        let coupon = Coupon::percentage("PERCENT10", "10% 할인", 10);
        let outcome = apply_coupon(Some(&coupon), Money::from_cents(9_999));
        assert_eq!(outcome.post_total.cents(), 8_999);
    }

    #[test]
    fn test_scenario_d_degenerate_percentage_clamps() {
        // percentage 200 would drive 3,000 to −3,000; clamp to free cart
        let coupon = Coupon::percentage("BROKEN", "degenerate", 200);
        let outcome = apply_coupon(Some(&coupon), Money::from_cents(3_000));
        assert_eq!(outcome.post_total.cents(), 0);
        assert_eq!(outcome.applied_discount.cents(), 3_000);
    }

    #[test]
    fn test_empty_cart_application_is_not_an_error() {
        let coupon = Coupon::amount("AMOUNT5000", "5000원 할인", 5000);
        let outcome = apply_coupon(Some(&coupon), Money::zero());
        assert_eq!(outcome.post_total.cents(), 0);
        assert_eq!(outcome.applied_discount.cents(), 0);
    }

    #[test]
    fn test_policy_rejects_percentage_below_minimum() {
        let policy = CouponPolicy::default();
        let coupon = Coupon::percentage("PERCENT10", "10% 할인", 10);

        let err = policy.check(&coupon, Money::from_cents(9_999)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CouponBelowMinimum {
                minimum_cents: 10_000,
                total_cents: 9_999,
                ..
            }
        ));

        assert!(policy.check(&coupon, Money::from_cents(10_000)).is_ok());
    }

    #[test]
    fn test_policy_accepts_amount_coupons_always() {
        let policy = CouponPolicy::default();
        let coupon = Coupon::amount("AMOUNT5000", "5000원 할인", 5000);
        assert!(policy.check(&coupon, Money::zero()).is_ok());
    }

    #[test]
    fn test_unrestricted_policy() {
        let policy = CouponPolicy::unrestricted();
        let coupon = Coupon::percentage("PERCENT10", "10% 할인", 10);
        assert!(policy.check(&coupon, Money::zero()).is_ok());
    }
}
