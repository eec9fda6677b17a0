//! # Session State
//!
//! Who is shopping. The cart never checks this; only order history and
//! checkout read it to attribute orders.

use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct SessionState {
    user_id: RwLock<Option<String>>,
}

impl SessionState {
    /// A session for `user_id`, or a guest session when `None`.
    pub fn new(user_id: Option<String>) -> Self {
        SessionState {
            user_id: RwLock::new(user_id.filter(|id| !id.trim().is_empty())),
        }
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<String> {
        self.user_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn sign_in(&self, user_id: impl Into<String>) {
        *self.user_id.write().unwrap_or_else(PoisonError::into_inner) = Some(user_id.into());
    }

    pub fn sign_out(&self) {
        *self.user_id.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
