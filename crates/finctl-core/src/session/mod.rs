//! Session management.
//!
//! - [`SessionContext`]: durable token/user pair, auth-state broadcast and
//!   logout redirect. Constructed once by the application root and shared.
//! - [`SessionManager`]: the network side (login, token validation, refresh,
//!   startup initialization).

mod context;
mod manager;

pub use context::{SessionContext, TOKEN_KEY, USER_KEY};
pub use manager::SessionManager;

use crate::types::User;

/// Authentication state as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(User),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            AuthState::Unauthenticated => None,
        }
    }
}

/// Moves the user to the login screen after logout.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Navigator for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect_to_login(&self) {}
}
