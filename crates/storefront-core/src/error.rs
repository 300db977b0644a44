//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Pricing/cart/coupon rule violations            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-session errors (separate crate)                            │
//! │  └── ApiError         - What the UI collaborator sees (serialized)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → toast                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, coupon code, stock)
//! 3. Errors are enum variants, never String
//! 4. Every error is recoverable at the boundary; none is fatal
//!
//! ## What Is NOT an Error
//! The engine never fails on malformed totals - a coupon bigger than the
//! cart floors the total at zero, and an over-stock `add` clamps silently.
//! Errors are reserved for operations the caller must reject or retry.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing/cart errors.
///
/// These errors represent business rule violations. They are returned as
/// discriminated results to the calling collaborator, which decides the
/// user-visible messaging.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity exceeds the product's current stock.
    ///
    /// ## When This Occurs
    /// - Explicit `set_quantity` above the stock ceiling (rejected, line
    ///   unchanged - unlike `add_product`, which clamps silently)
    /// - Adding a product whose stock is already exhausted
    ///
    /// ## User Workflow
    /// ```text
    /// Set quantity to 25 (stock: 20)
    ///      │
    ///      ▼
    /// StockExceeded { product_id: "p1", stock: 20, requested: 25 }
    ///      │
    ///      ▼
    /// UI shows: "재고는 20개까지만 있습니다"
    /// ```
    #[error("Stock exceeded for {product_id}: stock {stock}, requested {requested}")]
    StockExceeded {
        product_id: String,
        stock: i64,
        requested: i64,
    },

    /// A coupon with the same code already exists in the coupon book.
    ///
    /// Registration is aborted and the existing coupon is left untouched -
    /// no overwrite, no partial state change.
    #[error("Coupon code already exists: {0}")]
    DuplicateCouponCode(String),

    /// The coupon code is absent from the coupon book.
    ///
    /// Applying it is a no-op: the cart's applied coupon stays unchanged.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// A percentage coupon was applied below the configured minimum total.
    #[error(
        "Coupon {code} requires a total of at least {minimum_cents}, cart total is {total_cents}"
    )]
    CouponBelowMinimum {
        code: String,
        minimum_cents: i64,
        total_cents: i64,
    },

    /// The cart has no line for the given product id.
    ///
    /// Only raised by explicit quantity changes; `remove_product` on an
    /// absent line is an idempotent no-op.
    #[error("Product not in cart: {0}")]
    LineNotFound(String),

    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with the same id already exists in the catalog.
    #[error("Product id already exists: {0}")]
    DuplicateProductId(String),

    /// Cart has exceeded maximum allowed distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the absolute maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when admin/shopper input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad characters in a coupon code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate tier quantity).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Discount tiers must ascend strictly by minimum quantity.
    #[error("discount tiers must be sorted ascending by minQuantity (tier {index})")]
    TiersNotAscending { index: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::StockExceeded {
            product_id: "p1".to_string(),
            stock: 20,
            requested: 25,
        };
        assert_eq!(
            err.to_string(),
            "Stock exceeded for p1: stock 20, requested 25"
        );

        let err = CoreError::DuplicateCouponCode("AMOUNT5000".to_string());
        assert_eq!(err.to_string(), "Coupon code already exists: AMOUNT5000");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TiersNotAscending { index: 1 };
        assert_eq!(
            err.to_string(),
            "discount tiers must be sorted ascending by minQuantity (tier 1)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
