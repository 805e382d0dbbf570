//! In-process fakes for unit tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::{ApiRequest, HttpFailure, Pipeline, Transport};
use crate::normalizer::ErrorNormalizer;
use crate::notify::{Notification, Notifier};
use crate::session::{Navigator, SessionContext, SessionManager, TOKEN_KEY, USER_KEY};
use crate::storage::{DurableStorage, MemoryStorage, StorageOp};
use crate::types::User;

pub fn sample_user(id: i64, email: &str) -> User {
    User {
        id,
        name: "Ana".into(),
        email: email.into(),
        role: "USER".into(),
    }
}

/// Transport answering from a queue of scripted responses.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, HttpFailure>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn push_ok(&self, body: Value) {
        self.responses.lock().unwrap().push_back(Ok(body));
    }

    pub fn push_status(&self, status: u16, body: Option<Value>) {
        self.responses.lock().unwrap().push_back(Err(HttpFailure::Status {
            status,
            message: format!("Http failure response: {}", status),
            body,
        }));
    }

    pub fn push_client_error(&self, message: &str) {
        self.responses.lock().unwrap().push_back(Err(HttpFailure::Client {
            message: message.into(),
        }));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, HttpFailure> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(HttpFailure::Client {
                    message: "no scripted response".into(),
                })
            })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    count: AtomicUsize,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fully wired session + pipeline over fakes.
pub struct Harness {
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub transport: Arc<ScriptedTransport>,
    pub session: Arc<SessionContext>,
    pub pipeline: Pipeline,
    pub manager: SessionManager,
}

impl Harness {
    pub fn new() -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let transport = Arc::new(ScriptedTransport::default());
        let session = Arc::new(SessionContext::new(storage.clone(), navigator.clone()));
        let pipeline = Pipeline::new(transport.clone(), session.clone(), notifier.clone());
        let manager = SessionManager::new(pipeline.clone());

        Self {
            storage,
            navigator,
            notifier,
            transport,
            session,
            pipeline,
            manager,
        }
    }

    /// Write a session to storage as a previous run would have left it.
    pub fn seed_session(&self, token: &str, user_id: i64, email: &str) {
        let user = serde_json::to_string(&sample_user(user_id, email)).unwrap();
        self.storage
            .apply(&[StorageOp::set(TOKEN_KEY, token), StorageOp::set(USER_KEY, user)])
            .unwrap();
    }

    pub fn normalizer(&self) -> ErrorNormalizer {
        ErrorNormalizer::new(self.session.clone(), self.notifier.clone())
    }
}
