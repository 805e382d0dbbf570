//! Raw HTTP transport.
//!
//! A [`Transport`] sends one request and reports either the decoded JSON body
//! or an [`HttpFailure`]. It knows nothing about sessions or user-facing
//! messages; that is the pipeline's job.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// An API request relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter when present.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Look up a query parameter (first match).
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A failed HTTP exchange, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpFailure {
    /// No server response reached the client (connection refused, DNS, TLS...).
    Client { message: String },
    /// The server replied with a non-success status.
    Status {
        status: u16,
        message: String,
        body: Option<Value>,
    },
}

impl HttpFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpFailure::Client { .. } => None,
            HttpFailure::Status { status, .. } => Some(*status),
        }
    }

    /// The raw transport message.
    pub fn message(&self) -> &str {
        match self {
            HttpFailure::Client { message } | HttpFailure::Status { message, .. } => message,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            HttpFailure::Client { .. } => None,
            HttpFailure::Status { body, .. } => body.as_ref(),
        }
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Sends API requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> std::result::Result<Value, HttpFailure>;
}

/// Decode a response body: empty is `null`, JSON is parsed, anything else is
/// kept as a string.
pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(feature = "client")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "client")]
mod reqwest_transport {
    use super::*;
    use crate::error::Error;
    use std::time::Duration;
    use tracing::debug;

    /// HTTP transport over reqwest.
    #[derive(Clone)]
    pub struct ReqwestTransport {
        base_url: String,
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Create a transport for `base_url` (e.g. `http://localhost:8080/api`).
        pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
            let mut builder = reqwest::Client::builder();
            if let Some(t) = timeout {
                builder = builder.timeout(t);
            }
            let client = builder
                .build()
                .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

            Ok(Self {
                base_url: base_url.into().trim_end_matches('/').to_string(),
                client,
            })
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    fn to_reqwest(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: ApiRequest) -> std::result::Result<Value, HttpFailure> {
            let url = format!("{}{}", self.base_url, request.path);
            debug!("API request: {} {}", request.method, url);

            let mut req = self
                .client
                .request(to_reqwest(request.method), &url)
                .query(&request.query);

            if let Some(ref token) = request.bearer {
                req = req.bearer_auth(token);
            }

            if let Some(ref body) = request.body {
                req = req.json(body);
            }

            let resp = req.send().await.map_err(|e| HttpFailure::Client {
                message: e.to_string(),
            })?;

            let status = resp.status();
            let text = resp.text().await.map_err(|e| HttpFailure::Client {
                message: e.to_string(),
            })?;
            let body = parse_body(&text);

            if status.is_success() {
                Ok(body)
            } else {
                Err(HttpFailure::Status {
                    status: status.as_u16(),
                    message: format!("Http failure response for {}: {}", url, status),
                    body: (!body.is_null()).then_some(body),
                })
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_base_url_trailing_slash_trimmed() {
            let transport = ReqwestTransport::new("http://localhost:8080/api/", None).unwrap();
            assert_eq!(transport.base_url(), "http://localhost:8080/api");
        }
    }
}
