//! finctl-core - Core library for finctl
//!
//! Client-side logic for the personal finance REST API:
//!
//! - **session**: token/user lifecycle, durable persistence, auth-state broadcast
//! - **normalizer**: maps failed HTTP calls to user-facing messages
//! - **client**: request pipeline (bearer token, transport, normalization)
//! - **api**: accounts, cards and transactions services
//! - **storage**: durable key-value storage (file, memory)
//! - **validation**: client-side form rules
//! - **dashboard**: balance and spending overview
//! - **view**: per-view teardown scopes

pub mod api;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod normalizer;
pub mod notify;
pub mod session;
pub mod storage;
pub mod types;
pub mod validation;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use api::FinanceApi;
pub use client::Pipeline;
pub use error::{Error, Result};
pub use session::{AuthState, SessionContext, SessionManager};
