//! Login, token validation and refresh.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::{AuthState, SessionContext};
use crate::client::{ApiRequest, Pipeline};
use crate::error::{Error, Result};
use crate::types::{
    LoginRequest, LoginResponse, RefreshResponse, RegisterRequest, RegisterResponse, TokenRequest,
    TokenValidation, User,
};

/// Auth endpoints, relative to the API base URL
const AUTH_PATH: &str = "/auth";

/// Network side of session handling.
#[derive(Clone)]
pub struct SessionManager {
    ctx: Arc<SessionContext>,
    pipeline: Pipeline,
}

impl SessionManager {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            ctx: pipeline.session().clone(),
            pipeline,
        }
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.ctx
    }

    /// Run once per process start.
    ///
    /// A stored session is re-validated against the backend; if the token is
    /// rejected or the check fails for any reason, the session is cleared.
    pub async fn initialize(&self) -> AuthState {
        let token = match (self.ctx.token(), self.ctx.current_user()) {
            (Ok(Some(token)), Ok(Some(_))) => token,
            (Err(e), _) | (_, Err(e)) => {
                warn!("Unreadable stored session: {}", e);
                self.ctx.logout();
                return self.ctx.state();
            }
            _ => {
                debug!("No stored session");
                return self.ctx.state();
            }
        };

        if self.validate_token(&token).await {
            match self.ctx.restore() {
                Ok(true) => info!("Stored session is valid"),
                Ok(false) => self.ctx.logout(),
                Err(e) => {
                    warn!("Failed to restore session: {}", e);
                    self.ctx.logout();
                }
            }
        } else {
            info!("Stored session is no longer valid");
            self.ctx.logout();
        }

        self.ctx.state()
    }

    /// Authenticate and persist the new session. Errors propagate unchanged.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        let request = ApiRequest::post(format!("{}/login", AUTH_PATH)).json(credentials)?;
        let response: LoginResponse = self.pipeline.call(request).await.inspect_err(|e| {
            error!("Login failed: {}", e);
        })?;

        self.ctx.establish(&response.token, &response.user)?;
        Ok(response)
    }

    /// Create a new user. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        let request = ApiRequest::post(format!("{}/registro", AUTH_PATH)).json(request)?;
        self.pipeline.call(request).await.inspect_err(|e| {
            error!("Registration failed: {}", e);
        })
    }

    /// Clear the session and redirect to login.
    pub fn logout(&self) {
        self.ctx.logout();
    }

    /// Local check only; see [`SessionContext::is_authenticated`].
    pub fn is_authenticated(&self) -> bool {
        self.ctx.is_authenticated()
    }

    /// Ask the backend whether `token` is still valid. Any failure counts as
    /// invalid.
    pub async fn validate_token(&self, token: &str) -> bool {
        let request = match ApiRequest::post(format!("{}/validar-token", AUTH_PATH))
            .json(&TokenRequest { token })
        {
            Ok(r) => r,
            Err(_) => return false,
        };

        match self.pipeline.call::<TokenValidation>(request).await {
            Ok(validation) => validation.valid,
            Err(e) => {
                debug!("Token validation failed: {}", e);
                false
            }
        }
    }

    /// Exchange the stored token for a new one.
    ///
    /// Fails locally with [`Error::NoToken`] when there is no stored token.
    /// On any failure the session is cleared and the error propagates.
    pub async fn refresh_token(&self) -> Result<RefreshResponse> {
        let token = self.ctx.token()?.ok_or(Error::NoToken)?;

        let request = ApiRequest::post(format!("{}/refresh", AUTH_PATH))
            .json(&TokenRequest { token: &token })?;

        let result = match self.pipeline.call::<RefreshResponse>(request).await {
            Ok(response) => self.ctx.replace_token(&response.token).map(|_| response),
            Err(e) => Err(e),
        };

        result.inspect_err(|e| {
            error!("Token refresh failed: {}", e);
            self.ctx.logout();
        })
    }

    pub fn current_user(&self) -> Option<User> {
        self.ctx.current_user().ok().flatten()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.ctx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{HttpFailure, Transport};
    use crate::session::{TOKEN_KEY, USER_KEY};
    use crate::storage::DurableStorage;
    use crate::testing::Harness;
    use serde_json::{json, Value};

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "ana@example.com".into(),
            password: "secret1".into(),
        }
    }

    fn login_body(token: &str) -> serde_json::Value {
        json!({
            "token": token,
            "usuario": { "id": 42, "nome": "Ana", "email": "ana@example.com", "perfil": "USER" },
            "expiresIn": 86400
        })
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let h = Harness::new();
        let rx = h.manager.subscribe();
        h.transport.push_ok(login_body("jwt-1"));

        let resp = h.manager.login(&credentials()).await.unwrap();

        assert_eq!(resp.token, "jwt-1");
        assert_eq!(h.storage.get(TOKEN_KEY).unwrap().as_deref(), Some("jwt-1"));
        let stored = h.session.current_user().unwrap().unwrap();
        assert_eq!(stored.id, 42);
        assert_eq!(stored.email, "ana@example.com");
        assert!(h.manager.is_authenticated());
        assert!(rx.borrow().is_authenticated());

        let sent = &h.transport.requests()[0];
        assert_eq!(sent.path, "/auth/login");
        assert_eq!(sent.body.as_ref().unwrap()["senha"], "secret1");
    }

    #[tokio::test]
    async fn test_login_failure_propagates() {
        let h = Harness::new();
        h.transport
            .push_status(400, Some(json!({ "error": "Credenciais inválidas" })));

        let err = h.manager.login(&credentials()).await.unwrap_err();

        assert_eq!(err.user_message(), Some("Credenciais inválidas"));
        assert!(!h.manager.is_authenticated());
        assert!(h.storage.is_empty());
    }

    #[tokio::test]
    async fn test_logout_then_not_authenticated() {
        let h = Harness::new();
        h.transport.push_ok(login_body("jwt-1"));
        h.manager.login(&credentials()).await.unwrap();

        h.manager.logout();

        assert!(!h.manager.is_authenticated());
        assert_eq!(h.navigator.redirects(), 1);
    }

    #[tokio::test]
    async fn test_validate_token() {
        let h = Harness::new();
        h.transport.push_ok(json!({ "valid": true }));
        h.transport.push_ok(json!({ "valid": false }));
        h.transport.push_client_error("connection refused");

        assert!(h.manager.validate_token("a").await);
        assert!(!h.manager.validate_token("b").await);
        assert!(!h.manager.validate_token("c").await);
        assert_eq!(h.transport.requests()[0].body.as_ref().unwrap()["token"], "a");
    }

    #[tokio::test]
    async fn test_initialize_with_valid_token() {
        let h = Harness::new();
        h.seed_session("jwt-1", 7, "ana@example.com");
        h.transport.push_ok(json!({ "valid": true }));

        let state = h.manager.initialize().await;

        assert!(state.is_authenticated());
        assert_eq!(state.user().unwrap().id, 7);
        assert_eq!(h.navigator.redirects(), 0);
    }

    #[tokio::test]
    async fn test_initialize_with_rejected_token_clears_storage() {
        let h = Harness::new();
        h.seed_session("stale", 7, "ana@example.com");
        h.transport.push_ok(json!({ "valid": false }));

        let state = h.manager.initialize().await;

        assert_eq!(state, AuthState::Unauthenticated);
        assert!(h.storage.get(TOKEN_KEY).unwrap().is_none());
        assert!(h.storage.get(USER_KEY).unwrap().is_none());
        assert_eq!(h.navigator.redirects(), 1);
    }

    #[tokio::test]
    async fn test_initialize_network_error_logs_out() {
        let h = Harness::new();
        h.seed_session("jwt", 7, "ana@example.com");
        h.transport.push_client_error("timed out");

        let state = h.manager.initialize().await;

        assert!(!state.is_authenticated());
        assert!(h.storage.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_without_session_sends_nothing() {
        let h = Harness::new();
        let state = h.manager.initialize().await;
        assert!(!state.is_authenticated());
        assert!(h.transport.requests().is_empty());
        assert_eq!(h.navigator.redirects(), 0);
    }

    #[tokio::test]
    async fn test_refresh_without_token_fails_locally() {
        let h = Harness::new();

        let err = h.manager.refresh_token().await.unwrap_err();

        assert!(matches!(err, Error::NoToken));
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_persists_new_token() {
        let h = Harness::new();
        h.seed_session("old", 7, "ana@example.com");
        h.transport.push_ok(json!({ "token": "new", "expiresIn": 86400 }));

        let resp = h.manager.refresh_token().await.unwrap();

        assert_eq!(resp.token, "new");
        assert_eq!(h.session.token().unwrap().as_deref(), Some("new"));
        assert!(h.manager.is_authenticated());
        assert_eq!(h.transport.requests()[0].body.as_ref().unwrap()["token"], "old");
    }

    #[tokio::test]
    async fn test_refresh_failure_logs_out() {
        let h = Harness::new();
        h.seed_session("old", 7, "ana@example.com");
        h.transport
            .push_status(500, Some(json!({ "error": "Erro ao renovar token" })));

        let err = h.manager.refresh_token().await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(!h.manager.is_authenticated());
        assert_eq!(h.navigator.redirects(), 1);
    }

    /// Clears the session while the refresh request is in flight.
    struct LogoutDuringSend {
        ctx: Arc<SessionContext>,
    }

    #[async_trait::async_trait]
    impl Transport for LogoutDuringSend {
        async fn send(&self, _request: ApiRequest) -> std::result::Result<Value, HttpFailure> {
            self.ctx.logout();
            Ok(json!({ "token": "new" }))
        }
    }

    #[tokio::test]
    async fn test_refresh_after_concurrent_logout_keeps_session_cleared() {
        let h = Harness::new();
        h.seed_session("old", 7, "ana@example.com");
        let transport = Arc::new(LogoutDuringSend {
            ctx: h.session.clone(),
        });
        let pipeline = Pipeline::new(transport, h.session.clone(), h.notifier.clone());
        let manager = SessionManager::new(pipeline);

        let err = manager.refresh_token().await.unwrap_err();

        assert!(matches!(err, Error::NoToken));
        assert!(h.storage.get(TOKEN_KEY).unwrap().is_none());
        assert!(h.storage.get(USER_KEY).unwrap().is_none());
        assert!(!manager.is_authenticated());
        assert!(h.navigator.redirects() >= 1);
    }

    #[tokio::test]
    async fn test_register_does_not_log_in() {
        let h = Harness::new();
        h.transport.push_ok(json!({
            "message": "Usuário criado com sucesso",
            "usuario": { "id": 3, "nome": "Bia", "email": "bia@example.com", "perfil": "USER" }
        }));

        let resp = h
            .manager
            .register(&RegisterRequest {
                name: "Bia".into(),
                email: "bia@example.com".into(),
                password: "secret1".into(),
                role: None,
            })
            .await
            .unwrap();

        assert_eq!(resp.user.unwrap().id, 3);
        assert!(!h.manager.is_authenticated());
        assert_eq!(h.transport.requests()[0].path, "/auth/registro");
    }
}
