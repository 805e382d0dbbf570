//! Error normalization for failed HTTP calls.
//!
//! Translates transport failures and status codes into a single user-facing
//! message, notifies the user, and forces logout on authentication failures.
//!
//! | Status     | Category         | Message                                   |
//! |------------|------------------|-------------------------------------------|
//! | (none)     | `Client`         | `Error: <underlying>`                     |
//! | 400, 422   | `Validation`     | body message, else `Invalid data`         |
//! | 401        | `Authentication` | fixed; logs out, no notification          |
//! | 403        | `Authorization`  | `Access denied`                           |
//! | 404        | `NotFound`       | `Resource not found`                      |
//! | 409        | `Conflict`       | body message, else `Data conflict`        |
//! | 500        | `Server`         | `Internal server error`                   |
//! | 503        | `Unavailable`    | `Service temporarily unavailable`         |
//! | other      | `Unknown`        | `Error <status>: <raw message>`           |

mod extract;

pub use extract::extract_body_message;

use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::client::HttpFailure;
use crate::notify::{Notification, Notifier};
use crate::session::SessionContext;

pub const MSG_INVALID_DATA: &str = "Invalid data";
pub const MSG_UNAUTHORIZED: &str = "Not authorized. Please log in again.";
pub const MSG_FORBIDDEN: &str = "Access denied";
pub const MSG_NOT_FOUND: &str = "Resource not found";
pub const MSG_CONFLICT: &str = "Data conflict";
pub const MSG_SERVER: &str = "Internal server error";
pub const MSG_UNAVAILABLE: &str = "Service temporarily unavailable";

/// Failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No server response reached the client.
    Client,
    /// 400 or 422. The user can correct the input.
    Validation,
    /// 401. Forces logout.
    Authentication,
    /// 403. Terminal for the current action.
    Authorization,
    /// 404
    NotFound,
    /// 409. The user can change the input (duplicate name...).
    Conflict,
    /// 500
    Server,
    /// 503
    Unavailable,
    /// Any other status.
    Unknown(u16),
}

impl ErrorCategory {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorCategory::Validation,
            401 => ErrorCategory::Authentication,
            403 => ErrorCategory::Authorization,
            404 => ErrorCategory::NotFound,
            409 => ErrorCategory::Conflict,
            500 => ErrorCategory::Server,
            503 => ErrorCategory::Unavailable,
            other => ErrorCategory::Unknown(other),
        }
    }

    pub fn of(failure: &HttpFailure) -> Self {
        match failure.status() {
            None => ErrorCategory::Client,
            Some(status) => Self::from_status(status),
        }
    }

    /// Whether the user sees a notification for this category.
    pub fn notifies(&self) -> bool {
        !matches!(self, ErrorCategory::Authentication)
    }
}

/// Compute the user-facing message for a failure.
pub fn user_message(failure: &HttpFailure, category: ErrorCategory) -> String {
    let extracted = || failure.body().and_then(extract_body_message);

    match category {
        ErrorCategory::Client => format!("Error: {}", failure.message()),
        ErrorCategory::Validation => extracted().unwrap_or_else(|| MSG_INVALID_DATA.to_string()),
        ErrorCategory::Authentication => MSG_UNAUTHORIZED.to_string(),
        ErrorCategory::Authorization => MSG_FORBIDDEN.to_string(),
        ErrorCategory::NotFound => MSG_NOT_FOUND.to_string(),
        ErrorCategory::Conflict => extracted().unwrap_or_else(|| MSG_CONFLICT.to_string()),
        ErrorCategory::Server => MSG_SERVER.to_string(),
        ErrorCategory::Unavailable => MSG_UNAVAILABLE.to_string(),
        ErrorCategory::Unknown(status) => format!("Error {}: {}", status, failure.message()),
    }
}

/// A normalized HTTP failure: the original failure plus its user message.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{user_message}")]
pub struct ApiError {
    pub original: HttpFailure,
    pub user_message: String,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        self.original.status()
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::of(&self.original)
    }
}

/// Pipeline stage applied to every failed call.
pub struct ErrorNormalizer {
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
}

impl ErrorNormalizer {
    pub fn new(session: Arc<SessionContext>, notifier: Arc<dyn Notifier>) -> Self {
        Self { session, notifier }
    }

    /// Normalize one failure. Side effects: logout on 401, a notification for
    /// every other category.
    pub fn normalize(&self, failure: HttpFailure) -> ApiError {
        let category = ErrorCategory::of(&failure);
        let message = user_message(&failure, category);

        warn!(
            status = ?failure.status(),
            category = ?category,
            "HTTP failure: {}",
            failure.message()
        );

        if category == ErrorCategory::Authentication {
            self.session.logout();
        }

        if category.notifies() {
            self.notifier.notify(Notification::error(message.clone()));
        }

        ApiError {
            original: failure,
            user_message: message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use serde_json::json;

    fn status(status: u16, body: Option<serde_json::Value>) -> HttpFailure {
        HttpFailure::Status {
            status,
            message: format!("Http failure response for /x: {}", status),
            body,
        }
    }

    #[test]
    fn test_every_known_status_has_a_message() {
        let h = Harness::new();
        for code in [400, 401, 403, 404, 409, 422, 500, 503] {
            let err = h.normalizer().normalize(status(code, None));
            assert!(!err.user_message.is_empty(), "empty message for {}", code);
            assert_eq!(err.status(), Some(code));
        }
    }

    #[test]
    fn test_unauthorized_logs_out_without_notification() {
        let h = Harness::new();
        h.seed_session("tok", 1, "ana@example.com");

        let err = h.normalizer().normalize(status(401, None));

        assert_eq!(err.user_message, MSG_UNAUTHORIZED);
        assert!(h.notifier.messages().is_empty());
        assert_eq!(h.navigator.redirects(), 1);
        assert!(!h.session.is_authenticated());
    }

    #[test]
    fn test_other_statuses_notify_once() {
        let h = Harness::new();
        h.normalizer().normalize(status(403, None));
        h.normalizer().normalize(status(503, None));

        assert_eq!(
            h.notifier.messages(),
            vec![MSG_FORBIDDEN.to_string(), MSG_UNAVAILABLE.to_string()]
        );
        assert_eq!(h.navigator.redirects(), 0);
    }

    #[test]
    fn test_validation_errors_joined() {
        let h = Harness::new();
        let body = json!({ "errors": [{ "message": "a" }, { "message": "b" }] });
        let err = h.normalizer().normalize(status(400, Some(body)));
        assert_eq!(err.user_message, "a, b");
    }

    #[test]
    fn test_validation_fallback() {
        let h = Harness::new();
        let err = h.normalizer().normalize(status(422, Some(json!({}))));
        assert_eq!(err.user_message, MSG_INVALID_DATA);
    }

    #[test]
    fn test_conflict_uses_body_message() {
        let h = Harness::new();
        let err = h
            .normalizer()
            .normalize(status(409, Some(json!({ "error": "Account name already exists" }))));
        assert_eq!(err.user_message, "Account name already exists");

        let err = h.normalizer().normalize(status(409, None));
        assert_eq!(err.user_message, MSG_CONFLICT);
    }

    #[test]
    fn test_client_side_failure() {
        let h = Harness::new();
        let err = h.normalizer().normalize(HttpFailure::Client {
            message: "connection refused".into(),
        });
        assert_eq!(err.user_message, "Error: connection refused");
        assert_eq!(err.category(), ErrorCategory::Client);
        assert_eq!(h.notifier.messages().len(), 1);
    }

    #[test]
    fn test_unknown_status_embeds_code_and_message() {
        let h = Harness::new();
        let failure = HttpFailure::Status {
            status: 418,
            message: "I'm a teapot".into(),
            body: None,
        };
        let err = h.normalizer().normalize(failure);
        assert_eq!(err.user_message, "Error 418: I'm a teapot");
        assert_eq!(err.category(), ErrorCategory::Unknown(418));
    }

    #[test]
    fn test_original_failure_preserved() {
        let h = Harness::new();
        let failure = status(500, Some(json!({ "error": "boom" })));
        let err = h.normalizer().normalize(failure.clone());
        assert_eq!(err.original, failure);
        assert_eq!(err.user_message, MSG_SERVER);
    }
}
