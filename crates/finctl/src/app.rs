//! Application root: builds the session, pipeline and services once per run.

use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

use finctl_core::client::ReqwestTransport;
use finctl_core::notify::{Notification, Notifier};
use finctl_core::session::Navigator;
use finctl_core::storage::FileStorage;
use finctl_core::{AuthState, FinanceApi, Pipeline, SessionContext, SessionManager};

use crate::config::Config;
use crate::error::FinctlError;

/// Prints notifications to stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{} {}", "✗".red(), notification.message);
    }
}

/// "Redirects" to login by telling the user how to log in again.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect_to_login(&self) {
        eprintln!(
            "{} Session ended. Run {} to continue.",
            "→".cyan(),
            "finctl auth login".cyan()
        );
    }
}

pub struct App {
    pub config: Config,
    pub session: SessionManager,
    pub api: FinanceApi,
}

impl App {
    /// Wire storage, transport and services from `config`.
    pub fn build(config: Config) -> Result<Self> {
        config.ensure_dirs()?;

        let storage = Arc::new(FileStorage::new(config.session_path()));
        let context = Arc::new(SessionContext::new(storage, Arc::new(TerminalNavigator)));
        let transport = ReqwestTransport::new(config.api.url.clone(), Some(config.request_timeout()))
            .context("Failed to create HTTP client")?;
        let notifier = Arc::new(TerminalNotifier);

        let pipeline = Pipeline::new(Arc::new(transport), context, notifier);
        let session = SessionManager::new(pipeline.clone());
        let api = FinanceApi::new(pipeline);

        Ok(Self {
            config,
            session,
            api,
        })
    }

    /// Build and re-validate any stored session.
    pub async fn start(config: Config) -> Result<Self> {
        let app = Self::build(config)?;
        let state = app.session.initialize().await;
        tracing::debug!(authenticated = state.is_authenticated(), "Session initialized");
        Ok(app)
    }

    pub fn state(&self) -> AuthState {
        self.session.context().state()
    }

    /// Fail early when a command needs a logged-in user.
    pub fn require_login(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(FinctlError::NotLoggedIn.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.paths.data_dir = dir.join("data");
        config.api.url = "http://127.0.0.1:9".to_string();
        config
    }

    #[test]
    fn test_build_starts_logged_out() {
        let dir = tempdir().unwrap();
        let app = App::build(config_in(dir.path())).unwrap();

        assert!(dir.path().join("data").is_dir());
        assert_eq!(app.state(), AuthState::Unauthenticated);
        assert!(app.require_login().is_err());
    }

    #[tokio::test]
    async fn test_start_without_stored_session_makes_no_request() {
        let dir = tempdir().unwrap();
        // Nothing stored, so nothing to re-validate.
        let app = App::start(config_in(dir.path())).await.unwrap();

        assert!(!app.session.is_authenticated());
        assert!(!app.config.session_path().exists());
    }
}
