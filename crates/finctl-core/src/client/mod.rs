//! HTTP pipeline for the finance API.
//!
//! Every call goes through [`Pipeline::execute`]:
//!
//! 1. the session token (if any) is attached as a bearer token,
//! 2. the [`Transport`] performs the exchange,
//! 3. failures pass through the [`ErrorNormalizer`] exactly once and come
//!    back as [`Error::Api`] carrying the user-facing message.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use finctl_core::client::{ApiRequest, Pipeline, ReqwestTransport};
//! use finctl_core::notify::LogNotifier;
//! use finctl_core::session::{NoopNavigator, SessionContext};
//! use finctl_core::storage::MemoryStorage;
//!
//! # async fn run() -> finctl_core::Result<()> {
//! let session = Arc::new(SessionContext::new(
//!     Arc::new(MemoryStorage::new()),
//!     Arc::new(NoopNavigator),
//! ));
//! let transport = ReqwestTransport::new("http://localhost:8080/api", None)?;
//! let pipeline = Pipeline::new(Arc::new(transport), session, Arc::new(LogNotifier));
//! let total: serde_json::Value = pipeline.call(ApiRequest::get("/contas/contar")).await?;
//! # Ok(())
//! # }
//! ```

mod transport;

pub use transport::{ApiRequest, HttpFailure, Method, Transport};
#[cfg(feature = "client")]
pub use transport::ReqwestTransport;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::normalizer::ErrorNormalizer;
use crate::notify::Notifier;
use crate::session::SessionContext;

/// Request pipeline shared by the session manager and the resource services.
#[derive(Clone)]
pub struct Pipeline {
    transport: Arc<dyn Transport>,
    normalizer: Arc<ErrorNormalizer>,
    session: Arc<SessionContext>,
}

impl Pipeline {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let normalizer = Arc::new(ErrorNormalizer::new(session.clone(), notifier));
        Self {
            transport,
            normalizer,
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Send a request and return the raw JSON body.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<Value> {
        if request.bearer.is_none() {
            request.bearer = self.session.token()?;
        }

        debug!("{} {}", request.method, request.path);

        match self.transport.send(request).await {
            Ok(body) => Ok(body),
            Err(failure) => Err(Error::Api(self.normalizer.normalize(failure))),
        }
    }

    /// Send a request and decode the JSON body.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.execute(request).await?;
        serde_json::from_value(body)
            .map_err(|e| Error::Serialization(format!("Failed to parse response: {}", e)))
    }

    /// Send a request whose response body is ignored.
    pub async fn call_unit(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use serde_json::json;

    #[tokio::test]
    async fn test_bearer_token_attached_when_logged_in() {
        let h = Harness::new();
        h.seed_session("tok-1", 1, "ana@example.com");
        h.transport.push_ok(json!({ "total": 3 }));

        let _: Value = h.pipeline.call(ApiRequest::get("/contas/contar")).await.unwrap();

        let sent = h.transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bearer.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_no_bearer_without_session() {
        let h = Harness::new();
        h.transport.push_ok(json!([]));

        let _: Vec<Value> = h.pipeline.call(ApiRequest::get("/contas")).await.unwrap();
        assert_eq!(h.transport.requests()[0].bearer, None);
    }

    #[tokio::test]
    async fn test_failure_is_normalized() {
        let h = Harness::new();
        h.transport.push_status(404, None);

        let err = h
            .pipeline
            .call_unit(ApiRequest::get("/contas/99"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(), Some("Resource not found"));
        assert_eq!(h.notifier.messages(), vec!["Resource not found".to_string()]);
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_serialization_error() {
        let h = Harness::new();
        h.transport.push_ok(json!({ "unexpected": true }));

        let result: Result<Vec<Value>> = h.pipeline.call(ApiRequest::get("/contas")).await;
        assert!(matches!(result, Err(Error::Serialization(_))));
        assert!(h.notifier.messages().is_empty());
    }
}
