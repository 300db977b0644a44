//! # Money Module
//!
//! Provides the `Money` and `DiscountRate` types for handling monetary
//! values and discount percentages safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a storefront that means:                                            │
//! │    10000 × 3 × (1 - 0.1) = 26999.999999999996 → wrong checkout total   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units + Basis Points                       │
//! │    Money is i64 minor units, rates are u32 basis points (1000 = 10%)   │
//! │    10000 × 3 × (10000 - 1000) / 10000 = 27000, exactly                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Policy
//! Discounted subtotals are **floored** (integer division truncates toward
//! zero on non-negative amounts). The store never charges a fraction more
//! than the advertised rate, and totals never go negative - they floor at
//! zero instead (`Money::floor_zero`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Intermediate results of coupon subtraction can dip
///   below zero before being clamped
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Product.price_cents ──► PricedLine.subtotal ──► pre-coupon total
///                                                       │
///                                  coupon applier ◄─────┘
///                                        │
///                                        ▼
///                               post-coupon total (never negative)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (cents, won, etc).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(10_000);
    /// assert_eq!(price.cents(), 10_000);
    /// ```
    ///
    /// ## Why Minor Units?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Calculations, snapshots and persisted records all use minor units.
    /// Only the UI converts to a display currency.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(10_000);
    /// let gross = unit_price.multiply_quantity(10);
    /// assert_eq!(gross.cents(), 100_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a discount rate and returns the discounted amount, floored.
    ///
    /// ## Formula
    /// `amount × (10000 − bps) / 10000` using i128 to prevent overflow.
    /// Integer division floors for non-negative amounts, which is exactly
    /// the "never charge a fraction more" policy.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::{DiscountRate, Money};
    ///
    /// let gross = Money::from_cents(100_000);
    /// let net = gross.apply_discount_rate(DiscountRate::from_bps(1000)); // 10% off
    /// assert_eq!(net.cents(), 90_000);
    /// ```
    pub fn apply_discount_rate(&self, rate: DiscountRate) -> Money {
        let remaining_bps = (DiscountRate::MAX_BPS - rate.bps().min(DiscountRate::MAX_BPS)) as i128;
        let net = self.0 as i128 * remaining_bps / DiscountRate::MAX_BPS as i128;
        Money(net as i64)
    }

    /// Clamps the value at zero from below.
    ///
    /// The storefront never shows a negative price: a coupon larger than
    /// the cart total produces a free cart, not a payout.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let overdrawn = Money::from_cents(-2_000);
    /// assert_eq!(overdrawn.floor_zero().cents(), 0);
    /// ```
    #[inline]
    pub const fn floor_zero(self) -> Money {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }
}

// =============================================================================
// Discount Rate Type
// =============================================================================

/// A discount rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (a typical bulk-purchase tier)
///
/// Tier tables in the admin UI are entered as fractions (0.1 = 10%);
/// [`DiscountRate::from_fraction`] converts them once at the boundary and
/// every calculation after that is integer math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100% expressed in basis points.
    pub const MAX_BPS: u32 = 10_000;

    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a fraction in `[0, 1)`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::DiscountRate;
    ///
    /// let rate = DiscountRate::from_fraction(0.1);
    /// assert_eq!(rate.bps(), 1000);
    /// ```
    pub fn from_fraction(fraction: f64) -> Self {
        DiscountRate((fraction * Self::MAX_BPS as f64).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / Self::MAX_BPS as f64
    }

    /// Zero discount rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows the amount with thousands grouping.
///
/// ## Note
/// This is for debugging and logs. The UI owns real currency formatting
/// (symbol, locale, fraction digits).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "{}{}", sign, grouped)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
