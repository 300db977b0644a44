//! # storefront-session: Session Facade for the Storefront Engine
//!
//! This crate is the in-process boundary the UI collaborator calls. It
//! owns the per-session state (catalog, coupon book, cart, coupon policy)
//! and translates UI events into engine operations.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Event Flow                               │
//! │                                                                         │
//! │  UI Event                 Session Operation         Engine Call         │
//! │  ────────                 ─────────────────         ───────────         │
//! │                                                                         │
//! │  Click product ─────────► add_to_cart(id, 1) ─────► cart.add_product   │
//! │                                                                         │
//! │  Change quantity ───────► update_cart_quantity ───► cart.set_quantity  │
//! │                                                                         │
//! │  Click remove ──────────► remove_from_cart ───────► cart.remove        │
//! │                                                                         │
//! │  Select coupon ─────────► apply_coupon(code) ─────► book.get + policy  │
//! │                                                                         │
//! │  Admin form submit ─────► create_product/... ─────► catalog.insert     │
//! │                                                                         │
//! │  Every mutation returns a fresh CartSnapshot (recompute-on-read) or    │
//! │  an ApiError the UI turns into a toast.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - The [`session::Session`] facade and its operations
//! - [`state`] - [`state::SessionState`], the shared `Arc<Mutex<Session>>`
//! - [`error`] - [`error::ApiError`], the serialized result the UI sees

pub mod error;
pub mod session;
pub mod state;

pub use error::{ApiError, ErrorCode};
pub use session::{NewProduct, Session};
pub use state::SessionState;
