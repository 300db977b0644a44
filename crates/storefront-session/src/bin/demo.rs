//! # Storefront Demo
//!
//! Seeds the reference catalog and walks a shopping scenario end to end.
//!
//! ## Usage
//! ```bash
//! cargo run -p storefront-session --bin demo
//!
//! # With command-level tracing
//! RUST_LOG=debug cargo run -p storefront-session --bin demo
//! ```
//!
//! ## Seeded Data
//! The reference storefront's initial catalog:
//! - 상품1: 10,000 / stock 20 / 10+ → 10%, 20+ → 20%
//! - 상품2: 20,000 / stock 10 / 10+ → 15%
//! - 상품3: 30,000 / stock 50 / 10+ → 20%, 30+ → 25%
//! and its two coupons (5,000 amount, 10% percentage).

use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_core::money::DiscountRate;
use storefront_core::types::{Coupon, DiscountTier, Product};
use storefront_session::Session;

/// The reference storefront's seed catalog.
fn seed_products() -> Vec<Product> {
    let now = Utc::now();
    let product = |id: &str, name: &str, price_cents: i64, stock: i64, tiers: Vec<DiscountTier>| {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(format!("{} 설명", name)),
            price_cents,
            stock,
            discounts: tiers,
            created_at: now,
            updated_at: now,
        }
    };

    vec![
        product(
            "p1",
            "상품1",
            10_000,
            20,
            vec![
                DiscountTier::new(10, DiscountRate::from_bps(1000)),
                DiscountTier::new(20, DiscountRate::from_bps(2000)),
            ],
        ),
        product(
            "p2",
            "상품2",
            20_000,
            10,
            vec![DiscountTier::new(10, DiscountRate::from_bps(1500))],
        ),
        product(
            "p3",
            "상품3",
            30_000,
            50,
            vec![
                DiscountTier::new(10, DiscountRate::from_bps(2000)),
                DiscountTier::new(30, DiscountRate::from_bps(2500)),
            ],
        ),
    ]
}

/// The reference storefront's seed coupons.
fn seed_coupons() -> Vec<Coupon> {
    vec![
        Coupon::amount("AMOUNT5000", "5000원 할인", 5000),
        Coupon::percentage("PERCENT10", "10% 할인", 10),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut session = Session::with_records(seed_products(), seed_coupons())?;
    info!(
        products = session.products().count(),
        coupons = session.coupons().count(),
        "session seeded"
    );

    // Ten units of 상품1 hit the 10% tier: 10000 × 10 × 0.9 = 90,000
    session.add_to_cart("p1", 10)?;

    // Asking for 15 more clamps at the stock ceiling of 20 (silent clamp)
    let snapshot = session.add_to_cart("p1", 15)?;
    info!(
        quantity = snapshot.lines[0].quantity,
        pre_coupon = snapshot.pre_coupon_total_cents,
        "after clamped add"
    );

    // Two units of 상품2, no tier qualifies: +40,000
    session.add_to_cart("p2", 2)?;

    // Flat 5,000 off the post-line-discount total
    let snapshot = session.apply_coupon("AMOUNT5000")?;
    info!(
        pre_coupon = snapshot.pre_coupon_total_cents,
        post_coupon = snapshot.post_coupon_total_cents,
        coupon_discount = snapshot.coupon_discount_cents,
        "after coupon"
    );

    // The snapshot is exactly what the rendering collaborator receives
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
