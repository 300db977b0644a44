//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Session commands (Rust)                                      │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Registries (catalog / coupon book)                           │
//! │  └── Uniqueness checks (duplicate id, duplicate code)                  │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_coupon_code, validate_quantity};
//!
//! validate_coupon_code("AMOUNT5000").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::DiscountRate;
use crate::types::{Coupon, DiscountTier, DiscountType, Product};
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("상품1").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a coupon code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
/// - Case is preserved: codes are compared case-sensitively elsewhere
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all products)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
///
/// Stock ceilings are a cart concern, not an input concern; they are
/// enforced by the aggregate at mutation time.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in minor units.
///
/// ## Rules
/// - Must be positive (> 0); the storefront has no free products
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero means sold out, not invalid
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Discount Tier Validators
// =============================================================================

/// Validates a product's discount tier table.
///
/// ## Rules
/// - Empty tables are fine (no bulk discount)
/// - `min_quantity` must be >= 1 for every tier
/// - Tiers must ascend **strictly** by `min_quantity` (no duplicates)
/// - Rates must be in (0, 1): 1..=9999 basis points
///
/// ## Example
/// ```rust
/// use storefront_core::money::DiscountRate;
/// use storefront_core::types::DiscountTier;
/// use storefront_core::validation::validate_discount_tiers;
///
/// let tiers = vec![
///     DiscountTier::new(10, DiscountRate::from_bps(1000)),
///     DiscountTier::new(20, DiscountRate::from_bps(2000)),
/// ];
/// assert!(validate_discount_tiers(&tiers).is_ok());
///
/// let unsorted = vec![
///     DiscountTier::new(20, DiscountRate::from_bps(2000)),
///     DiscountTier::new(10, DiscountRate::from_bps(1000)),
/// ];
/// assert!(validate_discount_tiers(&unsorted).is_err());
/// ```
pub fn validate_discount_tiers(tiers: &[DiscountTier]) -> ValidationResult<()> {
    for (index, tier) in tiers.iter().enumerate() {
        if tier.min_quantity < 1 {
            return Err(ValidationError::MustBePositive {
                field: format!("discounts[{}].minQuantity", index),
            });
        }

        if tier.rate.is_zero() || tier.rate.bps() >= DiscountRate::MAX_BPS {
            return Err(ValidationError::OutOfRange {
                field: format!("discounts[{}].rate", index),
                min: 1,
                max: (DiscountRate::MAX_BPS - 1) as i64,
            });
        }

        if index > 0 && tiers[index - 1].min_quantity >= tier.min_quantity {
            return Err(ValidationError::TiersNotAscending { index });
        }
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a full product record before it enters the catalog.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    validate_product_name(&product.name)?;
    validate_price_cents(product.price_cents)?;
    validate_stock(product.stock)?;
    validate_discount_tiers(&product.discounts)?;

    Ok(())
}

/// Validates a full coupon record before it enters the coupon book.
///
/// ## Rules
/// - Code and name must be valid strings
/// - Amount coupons: value must be positive
/// - Percentage coupons: value must be in 1..=100
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    validate_coupon_code(&coupon.code)?;

    if coupon.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    match coupon.discount_type {
        DiscountType::Amount => {
            if coupon.discount_value <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: "discountValue".to_string(),
                });
            }
        }
        DiscountType::Percentage => {
            if !(1..=100).contains(&coupon.discount_value) {
                return Err(ValidationError::OutOfRange {
                    field: "discountValue".to_string(),
                    min: 1,
                    max: 100,
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("상품1").is_ok());
        assert!(validate_product_name("Premium Widget").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("AMOUNT5000").is_ok());
        assert!(validate_coupon_code("PERCENT10").is_ok());
        assert!(validate_coupon_code("summer-sale_24").is_ok());

        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("has space").is_err());
        assert!(validate_coupon_code(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_and_stock() {
        assert!(validate_price_cents(10_000).is_ok());
        assert!(validate_price_cents(0).is_err()); // no free products
        assert!(validate_price_cents(-100).is_err());

        assert!(validate_stock(0).is_ok()); // sold out is valid
        assert!(validate_stock(50).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_discount_tiers() {
        let ok = vec![
            DiscountTier::new(10, DiscountRate::from_bps(1000)),
            DiscountTier::new(20, DiscountRate::from_bps(2000)),
        ];
        assert!(validate_discount_tiers(&ok).is_ok());
        assert!(validate_discount_tiers(&[]).is_ok());

        let unsorted = vec![
            DiscountTier::new(20, DiscountRate::from_bps(2000)),
            DiscountTier::new(10, DiscountRate::from_bps(1000)),
        ];
        assert!(matches!(
            validate_discount_tiers(&unsorted),
            Err(ValidationError::TiersNotAscending { index: 1 })
        ));

        let duplicate = vec![
            DiscountTier::new(10, DiscountRate::from_bps(1000)),
            DiscountTier::new(10, DiscountRate::from_bps(2000)),
        ];
        assert!(validate_discount_tiers(&duplicate).is_err());

        let full_rate = vec![DiscountTier::new(10, DiscountRate::from_bps(10_000))];
        assert!(validate_discount_tiers(&full_rate).is_err());

        let zero_rate = vec![DiscountTier::new(10, DiscountRate::zero())];
        assert!(validate_discount_tiers(&zero_rate).is_err());
    }

    #[test]
    fn test_validate_coupon() {
        assert!(validate_coupon(&Coupon::amount("AMOUNT5000", "5000원 할인", 5000)).is_ok());
        assert!(validate_coupon(&Coupon::percentage("PERCENT10", "10% 할인", 10)).is_ok());

        // Amount must be positive
        assert!(validate_coupon(&Coupon::amount("BAD", "bad", 0)).is_err());
        // Percentage must be 1..=100; degenerate values never enter the book
        assert!(validate_coupon(&Coupon::percentage("BAD", "bad", 200)).is_err());
        assert!(validate_coupon(&Coupon::percentage("BAD", "bad", 0)).is_err());
        // Name required
        assert!(validate_coupon(&Coupon::amount("OK", " ", 1000)).is_err());
    }

    #[test]
    fn test_validate_product_composite() {
        let mut product = Product {
            id: "p1".to_string(),
            name: "상품1".to_string(),
            description: None,
            price_cents: 10_000,
            stock: 20,
            discounts: vec![DiscountTier::new(10, DiscountRate::from_bps(1000))],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(validate_product(&product).is_ok());

        product.id = " ".to_string();
        assert!(validate_product(&product).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  상품  ").unwrap(), "상품");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(200)).is_err());
    }
}
