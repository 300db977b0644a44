//! # API Error Type
//!
//! Unified error type for session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Error Flow in the Storefront                            │
//! │                                                                         │
//! │  Frontend                      Rust Engine                              │
//! │  ────────                      ───────────                              │
//! │                                                                         │
//! │  session.applyCoupon('X')                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session operation                                               │  │
//! │  │  Result<CartSnapshot, ApiError>                                  │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Coupon missing? ── CoreError::CouponNotFound ──┐                │  │
//! │  │         │                                       ▼                │  │
//! │  │  Stock ceiling? ─── CoreError::StockExceeded ── ApiError ──────► │  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The UI matches on `code` and renders `message` as a toast.             │
//! │  The engine never renders anything itself.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! The UI collaborator is JavaScript, so the error is serializable and
//! includes both a machine-readable `code` and a human-readable `message`.

use serde::Serialize;
use storefront_core::CoreError;
use thiserror::Error;

/// API error returned from session operations.
///
/// ## Serialization
/// This is what the frontend receives when an operation fails:
/// ```json
/// {
///   "code": "COUPON_NOT_FOUND",
///   "message": "Coupon not found: SUMMER24"
/// }
/// ```
#[derive(Debug, Clone, Error, Serialize)]
#[error("[{code:?}] {message}")]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for session results.
///
/// ## Usage in Frontend
/// ```typescript
/// const result = session.addToCart(productId, 1);
/// if (!result.ok) {
///   switch (result.error.code) {
///     case 'STOCK_EXCEEDED':
///       toast.error(result.error.message);
///       break;
///     case 'NOT_FOUND':
///       toast.error('상품을 찾을 수 없습니다');
///       break;
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or cart line not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Requested quantity exceeds stock
    StockExceeded,

    /// Coupon code absent from the coupon book
    CouponNotFound,

    /// Coupon registration or application rejected
    CouponError,

    /// Cart bound exceeded (line count, max quantity)
    CartError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::StockExceeded {
                product_id,
                stock,
                requested,
            } => ApiError::new(
                ErrorCode::StockExceeded,
                format!(
                    "Stock exceeded for {}: {} in stock, {} requested",
                    product_id, stock, requested
                ),
            ),
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::LineNotFound(id) => ApiError::not_found("Cart line", &id),
            CoreError::CouponNotFound(code) => ApiError::new(
                ErrorCode::CouponNotFound,
                format!("Coupon not found: {}", code),
            ),
            CoreError::DuplicateCouponCode(code) => ApiError::new(
                ErrorCode::CouponError,
                format!("Coupon code already exists: {}", code),
            ),
            CoreError::CouponBelowMinimum {
                code,
                minimum_cents,
                ..
            } => ApiError::new(
                ErrorCode::CouponError,
                format!(
                    "Coupon {} requires a total of at least {}",
                    code, minimum_cents
                ),
            ),
            CoreError::DuplicateProductId(id) => ApiError::new(
                ErrorCode::ValidationError,
                format!("Product id already exists: {}", id),
            ),
            CoreError::CartTooLarge { max } => ApiError::new(
                ErrorCode::CartError,
                format!("Cart cannot have more than {} lines", max),
            ),
            CoreError::QuantityTooLarge { requested, max } => ApiError::new(
                ErrorCode::CartError,
                format!("Quantity {} exceeds maximum allowed ({})", requested, max),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
