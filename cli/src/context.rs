use specwatch_core::{AppConfig, RecordingIndex, ReplaySession};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// Shared handle to a replay session that can be passed to reader/tail tasks.
pub type SessionHandle = Arc<RwLock<ReplaySession>>;

/// Handles for the long-running tasks so they can be torn down on demand.
#[derive(Default)]
pub struct BackgroundTasks {
    pub watcher: Option<JoinHandle<()>>,
    pub tail: Option<JoinHandle<()>>,
    pub announcer: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Stop the tasks tied to the active recording, leaving the watcher running.
    pub fn abort_session_tasks(&mut self) {
        if let Some(tail) = self.tail.take() {
            tail.abort();
        }
        if let Some(announcer) = self.announcer.take() {
            announcer.abort();
        }
    }

    /// Stop everything, including the directory watcher.
    pub fn abort_all(&mut self) {
        self.abort_session_tasks();
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    /// The active replay session. None if no recording is loaded.
    /// When a recording is loaded, this is swapped with a new SessionHandle.
    session: Arc<RwLock<Option<SessionHandle>>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
    pub recording_index: Arc<RwLock<Option<RecordingIndex>>>,
}

impl CliContext {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::load())),
            session: Arc::new(RwLock::new(None)),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
            recording_index: Arc::new(RwLock::new(None)),
        }
    }

    /// Start a new replay session for the given recording path.
    /// Returns the session handle to pass to the reader.
    pub async fn start_session(&self, path: PathBuf) -> SessionHandle {
        let session = ReplaySession::new(path);
        let handle = Arc::new(RwLock::new(session));
        *self.session.write().await = Some(Arc::clone(&handle));
        handle
    }

    /// Get the current session handle, if one exists.
    pub async fn session(&self) -> Option<SessionHandle> {
        self.session.read().await.clone()
    }

    /// Clear the current session.
    pub async fn clear_session(&self) {
        *self.session.write().await = None;
    }
}
