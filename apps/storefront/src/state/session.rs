//! # Session State
//!
//! Navigation, the applied promo code and checkout bookkeeping for the one
//! shopper session.

use std::sync::{Arc, Mutex, PoisonError};

use verdant_core::Router;

/// Per-session data that is not the cart.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub router: Router,
    /// Id of the order placed most recently in this session.
    pub last_order_id: Option<String>,
    /// Promo code applied on the cart page, normalized to upper case.
    pub promo_code: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}
