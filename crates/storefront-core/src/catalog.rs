//! # Catalog Registries
//!
//! In-memory registries for products and coupons - the two collections
//! the engine receives from its collaborators and the admin surface
//! mutates.
//!
//! ## Ownership Boundaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  persistence collaborator                                               │
//! │  (two independent keys: products[], coupons[])                          │
//! │        │  deserialize              ▲  serialize                         │
//! │        ▼                           │                                    │
//! │  ┌───────────────────┐    ┌─────────────────┐                           │
//! │  │  ProductCatalog   │    │   CouponBook    │                           │
//! │  │  id → Product     │    │  code → Coupon  │                           │
//! │  └───────────────────┘    └─────────────────┘                           │
//! │        │ resolve ids               │ resolve codes                      │
//! │        ▼                           ▼                                    │
//! │              Cart aggregate (by reference, non-owning)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both registries keep **insertion order** (the admin list renders in the
//! order things were created) while enforcing identity uniqueness.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Coupon, DiscountTier, Product};
use crate::validation::{validate_coupon, validate_discount_tiers, validate_price_cents,
    validate_product, validate_product_name, validate_stock};

// =============================================================================
// Product Catalog
// =============================================================================

/// Insertion-ordered product registry, unique by product id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        ProductCatalog {
            products: Vec::new(),
        }
    }

    /// Builds a catalog from already-deserialized records.
    ///
    /// ## Errors
    /// Rejects invalid products and duplicate ids; on error nothing is
    /// kept (all-or-nothing, the collaborator re-seeds defaults).
    pub fn from_records(records: Vec<Product>) -> CoreResult<Self> {
        let mut catalog = ProductCatalog::new();
        for product in records {
            catalog.insert(product)?;
        }
        Ok(catalog)
    }

    /// Inserts a new product.
    ///
    /// ## Errors
    /// - Validation failure (name, price, stock, tier table)
    /// - [`CoreError::DuplicateProductId`] if the id is already taken
    pub fn insert(&mut self, product: Product) -> CoreResult<()> {
        validate_product(&product)?;

        if self.get(&product.id).is_some() {
            return Err(CoreError::DuplicateProductId(product.id));
        }

        self.products.push(product);
        Ok(())
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Applies an admin edit to a product.
    ///
    /// Only the provided fields change; `updated_at` is the caller's
    /// concern (the session layer stamps it).
    ///
    /// ## Errors
    /// - [`CoreError::ProductNotFound`] for an unknown id
    /// - Validation failure on any changed field (product left unchanged)
    pub fn update(&mut self, id: &str, update: ProductUpdate) -> CoreResult<&Product> {
        // Validate against the would-be state before touching anything
        if let Some(name) = &update.name {
            validate_product_name(name)?;
        }
        if let Some(price_cents) = update.price_cents {
            validate_price_cents(price_cents)?;
        }
        if let Some(stock) = update.stock {
            validate_stock(stock)?;
        }
        if let Some(discounts) = &update.discounts {
            validate_discount_tiers(discounts)?;
        }

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if update.description.is_some() {
            product.description = update.description;
        }
        if let Some(price_cents) = update.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(discounts) = update.discounts {
            product.discounts = discounts;
        }

        Ok(product)
    }

    /// Looks up a product mutably (stock adjustments).
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Removes a product. Returns the removed record, if any.
    ///
    /// Cart lines referencing it keep their frozen pricing snapshot.
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    /// Case-insensitive search over name and description.
    ///
    /// An empty query returns everything (the shop's default listing).
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&query))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// Iterates products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Product Update
// =============================================================================

/// Partial admin edit of a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
    pub discounts: Option<Vec<DiscountTier>>,
}

// =============================================================================
// Coupon Book
// =============================================================================

/// Insertion-ordered coupon registry, unique by case-sensitive code.
///
/// Existence (this book) and selection (the cart's applied coupon) are
/// two independent lifecycles; the book never knows what is applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    /// Creates an empty coupon book.
    pub fn new() -> Self {
        CouponBook {
            coupons: Vec::new(),
        }
    }

    /// Builds a book from already-deserialized records.
    pub fn from_records(records: Vec<Coupon>) -> CoreResult<Self> {
        let mut book = CouponBook::new();
        for coupon in records {
            book.register(coupon)?;
        }
        Ok(book)
    }

    /// Registers a new coupon.
    ///
    /// ## Errors
    /// - Validation failure (code format, name, value range)
    /// - [`CoreError::DuplicateCouponCode`]: registration aborted, the
    ///   existing coupon left untouched - no overwrite
    pub fn register(&mut self, coupon: Coupon) -> CoreResult<()> {
        validate_coupon(&coupon)?;

        if self.get(&coupon.code).is_some() {
            return Err(CoreError::DuplicateCouponCode(coupon.code));
        }

        self.coupons.push(coupon);
        Ok(())
    }

    /// Looks up a coupon by code. Case-sensitive.
    pub fn get(&self, code: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.code == code)
    }

    /// Removes a coupon by code. Returns the removed record, if any.
    pub fn remove(&mut self, code: &str) -> Option<Coupon> {
        let index = self.coupons.iter().position(|c| c.code == code)?;
        Some(self.coupons.remove(index))
    }

    /// Iterates coupons in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.iter()
    }

    /// Number of coupons.
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Checks if the book is empty.
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::DiscountRate;
    use chrono::Utc;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            price_cents: 10_000,
            stock: 20,
            discounts: vec![DiscountTier::new(10, DiscountRate::from_bps(1000))],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut catalog = ProductCatalog::new();
        catalog.insert(product("p1", "상품1")).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("p1").unwrap().name, "상품1");
        assert!(catalog.get("p2").is_none());
    }

    #[test]
    fn test_duplicate_product_id_rejected() {
        let mut catalog = ProductCatalog::new();
        catalog.insert(product("p1", "상품1")).unwrap();

        let err = catalog.insert(product("p1", "다른 상품")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateProductId(_)));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("p1").unwrap().name, "상품1"); // untouched
    }

    #[test]
    fn test_update_partial_fields() {
        let mut catalog = ProductCatalog::new();
        catalog.insert(product("p1", "상품1")).unwrap();

        catalog
            .update(
                "p1",
                ProductUpdate {
                    price_cents: Some(12_000),
                    ..Default::default()
                },
            )
            .unwrap();

        let updated = catalog.get("p1").unwrap();
        assert_eq!(updated.price_cents, 12_000);
        assert_eq!(updated.name, "상품1"); // unchanged
    }

    #[test]
    fn test_update_validates_before_mutating() {
        let mut catalog = ProductCatalog::new();
        catalog.insert(product("p1", "상품1")).unwrap();

        let err = catalog
            .update(
                "p1",
                ProductUpdate {
                    name: Some(String::new()),
                    price_cents: Some(12_000),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        // No partial write
        assert_eq!(catalog.get("p1").unwrap().price_cents, 10_000);
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let mut catalog = ProductCatalog::new();
        let mut widget = product("p1", "Premium Widget");
        widget.description = Some("best in class".to_string());
        catalog.insert(widget).unwrap();
        catalog.insert(product("p2", "상품2")).unwrap();

        assert_eq!(catalog.search("widget").len(), 1);
        assert_eq!(catalog.search("BEST").len(), 1);
        assert_eq!(catalog.search("상품").len(), 1);
        assert_eq!(catalog.search("").len(), 2); // empty query = everything
        assert!(catalog.search("nothing").is_empty());
    }

    #[test]
    fn test_remove_product() {
        let mut catalog = ProductCatalog::new();
        catalog.insert(product("p1", "상품1")).unwrap();

        assert!(catalog.remove("p1").is_some());
        assert!(catalog.remove("p1").is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_coupon_register_and_duplicate() {
        let mut book = CouponBook::new();
        book.register(Coupon::amount("AMOUNT5000", "5000원 할인", 5000))
            .unwrap();

        // P5: re-registering the same code leaves the book unchanged
        let err = book
            .register(Coupon::amount("AMOUNT5000", "다른 쿠폰", 9999))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateCouponCode(_)));
        assert_eq!(book.len(), 1);
        assert_eq!(book.get("AMOUNT5000").unwrap().discount_value, 5000);
    }

    #[test]
    fn test_coupon_codes_case_sensitive() {
        let mut book = CouponBook::new();
        book.register(Coupon::percentage("PERCENT10", "10% 할인", 10))
            .unwrap();

        assert!(book.get("PERCENT10").is_some());
        assert!(book.get("percent10").is_none());

        // Different case is a different code, not a duplicate
        book.register(Coupon::percentage("percent10", "lowercase", 10))
            .unwrap();
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_coupon_remove() {
        let mut book = CouponBook::new();
        book.register(Coupon::amount("AMOUNT5000", "5000원 할인", 5000))
            .unwrap();

        assert!(book.remove("AMOUNT5000").is_some());
        assert!(book.remove("AMOUNT5000").is_none());
        assert!(book.is_empty());
    }

    #[test]
    fn test_from_records_round_trip() {
        // The collaborator hands us already-deserialized arrays
        let records = vec![product("p1", "상품1"), product("p2", "상품2")];
        let catalog = ProductCatalog::from_records(records).unwrap();
        assert_eq!(catalog.len(), 2);

        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]); // insertion order preserved
    }
}
