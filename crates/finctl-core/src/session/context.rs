//! Shared session state.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use super::{AuthState, Navigator};
use crate::error::{Error, Result};
use crate::storage::{DurableStorage, StorageOp};
use crate::types::User;

/// Storage key of the session token
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key of the current user JSON
pub const USER_KEY: &str = "current_user";

/// Single source of truth for "who is logged in".
///
/// Token and user are always written and cleared together. State changes are
/// published with `send_replace`, so subscribers observe a transition before
/// the mutating call returns.
pub struct SessionContext {
    storage: Arc<dyn DurableStorage>,
    state: watch::Sender<AuthState>,
    navigator: Arc<dyn Navigator>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn DurableStorage>, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(AuthState::Unauthenticated);
        Self {
            storage,
            state,
            navigator,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Stored session token.
    pub fn token(&self) -> Result<Option<String>> {
        self.storage.get(TOKEN_KEY)
    }

    /// Stored current user.
    pub fn current_user(&self) -> Result<Option<User>> {
        match self.storage.get(USER_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| Error::Serialization(format!("Invalid stored user: {}", e))),
            None => Ok(None),
        }
    }

    /// True iff both a token and a user are in durable storage. No network.
    pub fn is_authenticated(&self) -> bool {
        matches!(
            (self.token(), self.current_user()),
            (Ok(Some(_)), Ok(Some(_)))
        )
    }

    pub fn current_user_id(&self) -> Option<i64> {
        self.current_user().ok().flatten().map(|u| u.id)
    }

    pub fn current_user_name(&self) -> String {
        self.current_user()
            .ok()
            .flatten()
            .map(|u| u.name)
            .unwrap_or_default()
    }

    pub fn current_user_email(&self) -> String {
        self.current_user()
            .ok()
            .flatten()
            .map(|u| u.email)
            .unwrap_or_default()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.current_user()
            .ok()
            .flatten()
            .is_some_and(|u| u.has_role(role))
    }

    pub fn is_admin(&self) -> bool {
        self.current_user()
            .ok()
            .flatten()
            .is_some_and(|u| u.is_admin())
    }

    /// Latest published state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Subscribe to auth-state transitions.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Persist a new session and publish it.
    pub fn establish(&self, token: &str, user: &User) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        self.storage.apply(&[
            StorageOp::set(TOKEN_KEY, token),
            StorageOp::set(USER_KEY, user_json),
        ])?;
        self.state.send_replace(AuthState::Authenticated(user.clone()));
        info!(user_id = user.id, "Session established for {}", user.email);
        Ok(())
    }

    /// Replace the token of the current session.
    ///
    /// Fails with [`Error::NoToken`] when the session was cleared in the
    /// meantime, so a logout is never undone by a late refresh.
    pub fn replace_token(&self, token: &str) -> Result<()> {
        self.storage
            .apply(&[
                StorageOp::require(TOKEN_KEY),
                StorageOp::require(USER_KEY),
                StorageOp::set(TOKEN_KEY, token),
            ])
            .map_err(|e| match e {
                Error::MissingKey(_) => Error::NoToken,
                other => other,
            })
    }

    /// Publish the stored session as authenticated. Returns false when storage
    /// does not hold a complete session.
    pub fn restore(&self) -> Result<bool> {
        match (self.token()?, self.current_user()?) {
            (Some(_), Some(user)) => {
                self.state.send_replace(AuthState::Authenticated(user));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Clear the session, publish unauthenticated and redirect to login.
    ///
    /// Always succeeds locally; storage failures are logged.
    pub fn logout(&self) {
        if let Err(e) = self
            .storage
            .apply(&[StorageOp::remove(TOKEN_KEY), StorageOp::remove(USER_KEY)])
        {
            warn!("Failed to clear session storage: {}", e);
        }
        self.state.send_replace(AuthState::Unauthenticated);
        self.navigator.redirect_to_login();
        info!("Session cleared");
    }
}
