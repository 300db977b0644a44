//! # Session State
//!
//! Shares one [`Session`] across the embedding runtime's command threads.
//!
//! ## Thread Safety
//! The engine itself is single-threaded and synchronous: every operation
//! completes before the next event is accepted, and a session is owned
//! exclusively by whoever created it. The mutex exists because embedding
//! runtimes (desktop shells, test harnesses) may dispatch commands from
//! more than one OS thread; it serializes access, it does not add
//! concurrency semantics.
//!
//! ## Why Not RwLock?
//! Session operations are quick and most of them mutate state. A RwLock
//! would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use crate::session::Session;

/// Runtime-managed session state.
#[derive(Debug)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    /// Wraps a session for shared access.
    pub fn new(session: Session) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = state.with_session(|s| s.cart_snapshot());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_session_mut(|s| s.add_to_cart(&product_id, 1))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new(Session::new())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip() {
        let state = SessionState::default();

        let count = state.with_session(|s| s.products().count());
        assert_eq!(count, 0);

        let snapshot = state.with_session_mut(|s| s.clear_cart());
        assert!(snapshot.lines.is_empty());
    }

    #[test]
    fn test_state_shares_one_session() {
        let state = SessionState::default();

        state.with_session_mut(|s| {
            s.register_coupon(storefront_core::Coupon::amount(
                "AMOUNT5000",
                "5000원 할인",
                5000,
            ))
        })
        .unwrap();

        let count = state.with_session(|s| s.coupons().count());
        assert_eq!(count, 1);
    }
}
