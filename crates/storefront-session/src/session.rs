//! # Session Operations
//!
//! The per-shopping-session facade: one catalog, one coupon book, one
//! cart, one coupon policy. Every UI event maps to exactly one operation
//! here, and every operation completes synchronously before the next
//! event is accepted.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Lifecycle                                │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Seeded  │────►│ Shopping │────►│  Coupon  │────►│ Checkout │       │
//! │  │ catalog  │     │  (cart)  │     │ applied  │     │ (clear)  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       apply_coupon                        │
//! │                   update/remove     clear_coupon                        │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────► (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Admin operations (product/coupon CRUD) share the session because the
//! reference storefront is a single-page demo; a real deployment would
//! split them behind separate surfaces without touching the engine.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use storefront_core::{
    Cart, CartSnapshot, Coupon, CouponBook, CouponPolicy, DiscountTier, Product, ProductCatalog,
    ProductUpdate,
};

use crate::error::ApiError;

// =============================================================================
// New Product Input
// =============================================================================

/// Admin input for creating a product. The session generates the id and
/// the timestamps; everything else comes from the form.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
    pub discounts: Vec<DiscountTier>,
}

// =============================================================================
// Session
// =============================================================================

/// A shopping session: the engine state one shopper (and the demo's
/// single admin) operates on.
///
/// All state is request-scoped - there are no module-level globals. The
/// embedding runtime creates a session, drives it, and drops it.
#[derive(Debug, Default)]
pub struct Session {
    catalog: ProductCatalog,
    coupons: CouponBook,
    cart: Cart,
    policy: CouponPolicy,
}

impl Session {
    /// Creates a session with empty registries and the default policy.
    pub fn new() -> Self {
        Session::default()
    }

    /// Creates a session from already-deserialized catalog/coupon records
    /// (the persistence collaborator owns the storage itself).
    pub fn with_records(
        products: Vec<Product>,
        coupons: Vec<Coupon>,
    ) -> Result<Self, ApiError> {
        Ok(Session {
            catalog: ProductCatalog::from_records(products)?,
            coupons: CouponBook::from_records(coupons)?,
            cart: Cart::new(),
            policy: CouponPolicy::default(),
        })
    }

    /// Overrides the coupon policy (kiosk builds disable the percentage
    /// minimum).
    pub fn with_policy(mut self, policy: CouponPolicy) -> Self {
        self.policy = policy;
        self
    }

    // -------------------------------------------------------------------------
    // Shop Operations
    // -------------------------------------------------------------------------

    /// Adds a product to the cart; over-stock requests clamp silently.
    pub fn add_to_cart(&mut self, product_id: &str, quantity: i64) -> Result<CartSnapshot, ApiError> {
        debug!(product_id, quantity, "add_to_cart");

        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| ApiError::not_found("Product", product_id))?;

        self.cart.add_product(product, quantity)?;
        Ok(self.cart.snapshot())
    }

    /// Sets a line's quantity; zero or less removes the line, over-stock
    /// is rejected with the line unchanged.
    pub fn update_cart_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
    ) -> Result<CartSnapshot, ApiError> {
        debug!(product_id, quantity, "update_cart_quantity");

        self.cart.set_quantity(product_id, quantity)?;
        Ok(self.cart.snapshot())
    }

    /// Removes a line. Idempotent; never fails.
    pub fn remove_from_cart(&mut self, product_id: &str) -> CartSnapshot {
        debug!(product_id, "remove_from_cart");

        self.cart.remove_product(product_id);
        self.cart.snapshot()
    }

    /// Applies a coupon by code. An unknown code leaves the cart's
    /// applied coupon unchanged.
    pub fn apply_coupon(&mut self, code: &str) -> Result<CartSnapshot, ApiError> {
        debug!(code, "apply_coupon");

        let coupon = self
            .coupons
            .get(code)
            .ok_or_else(|| ApiError::from(storefront_core::CoreError::CouponNotFound(code.to_string())))?
            .clone();

        self.cart.apply_coupon(&coupon, &self.policy)?;
        Ok(self.cart.snapshot())
    }

    /// Deselects the applied coupon.
    pub fn clear_coupon(&mut self) -> CartSnapshot {
        debug!("clear_coupon");

        self.cart.clear_coupon();
        self.cart.snapshot()
    }

    /// Empties the cart and clears the coupon (checkout or explicit clear).
    pub fn clear_cart(&mut self) -> CartSnapshot {
        debug!("clear_cart");

        self.cart.clear();
        self.cart.snapshot()
    }

    /// Returns the current snapshot without mutating anything.
    pub fn cart_snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Case-insensitive product search for the shop's listing.
    pub fn search_products(&self, query: &str) -> Result<Vec<&Product>, ApiError> {
        let query = storefront_core::validation::validate_search_query(query)
            .map_err(storefront_core::CoreError::from)?;
        Ok(self.catalog.search(&query))
    }

    // -------------------------------------------------------------------------
    // Admin Operations
    // -------------------------------------------------------------------------

    /// Creates a product from admin form input. Generates a UUID v4 id
    /// and stamps the timestamps.
    pub fn create_product(&mut self, input: NewProduct) -> Result<Product, ApiError> {
        debug!(name = %input.name, "create_product");

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            price_cents: input.price_cents,
            stock: input.stock,
            discounts: input.discounts,
            created_at: now,
            updated_at: now,
        };

        let created = product.clone();
        self.catalog.insert(product)?;
        Ok(created)
    }

    /// Applies an admin edit and bumps `updated_at`.
    pub fn update_product(
        &mut self,
        product_id: &str,
        update: ProductUpdate,
    ) -> Result<Product, ApiError> {
        debug!(product_id, "update_product");

        let updated = self.catalog.update(product_id, update)?.clone();
        // Stamp after the edit validated and landed
        if let Some(product) = self.catalog.get_mut(product_id) {
            product.updated_at = Utc::now();
            return Ok(product.clone());
        }
        Ok(updated)
    }

    /// Deletes a product from the catalog.
    ///
    /// Cart lines referencing it keep their frozen pricing snapshot; the
    /// shopper checks out what was in the cart when it was selected.
    pub fn delete_product(&mut self, product_id: &str) -> Result<Product, ApiError> {
        debug!(product_id, "delete_product");

        self.catalog
            .remove(product_id)
            .ok_or_else(|| ApiError::not_found("Product", product_id))
    }

    /// Registers a coupon. A duplicate code aborts the registration and
    /// leaves the existing coupon untouched.
    pub fn register_coupon(&mut self, coupon: Coupon) -> Result<(), ApiError> {
        debug!(code = %coupon.code, "register_coupon");

        self.coupons.register(coupon)?;
        Ok(())
    }

    /// Deletes a coupon from the book. If it is the cart's applied
    /// coupon, the selection is cleared too (existence and selection are
    /// separate lifecycles, but a deleted coupon must not keep
    /// discounting).
    pub fn delete_coupon(&mut self, code: &str) -> Result<Coupon, ApiError> {
        debug!(code, "delete_coupon");

        let removed = self
            .coupons
            .remove(code)
            .ok_or_else(|| ApiError::from(storefront_core::CoreError::CouponNotFound(code.to_string())))?;

        if self
            .cart
            .applied_coupon()
            .map(|c| c.code == code)
            .unwrap_or(false)
        {
            self.cart.clear_coupon();
        }

        Ok(removed)
    }

    /// Products in insertion order (the admin list and the default shop
    /// listing; the collaborator serializes this for persistence).
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.catalog.iter()
    }

    /// Coupons in insertion order.
    pub fn coupons(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
