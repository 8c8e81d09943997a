//! Async task management for non-blocking source operations.
//!
//! This module provides a way to execute async operations in background tasks
//! while keeping the UI responsive. It uses tokio channels to communicate
//! results back to the main event loop.
//!
//! # Architecture
//!
//! The task system follows a simple pattern:
//! 1. The application queues a [`Job`] instead of awaiting inline
//! 2. The main loop drains queued jobs and hands them to [`TaskSpawner`]
//! 3. The main loop continues rendering and handling events
//! 4. When the task completes, it sends an [`ApiMessage`] through the channel
//! 5. The main loop polls the channel with `try_recv()` and handles results
//!
//! Workers never touch application state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::source::{ActionRequest, LoadRequest, ResourceSource, Row};

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Rows loaded for a view.
    RowsFetched {
        view: String,
        /// The request that produced the rows.
        request: LoadRequest,
        result: Result<Vec<Row>, String>,
    },

    /// An action finished.
    ActionCompleted {
        view: String,
        action: String,
        result: Result<String, String>,
    },
}

/// Background work requested by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Load rows for a view.
    Fetch { view: String, request: LoadRequest },
    /// Perform an action on behalf of a view.
    Action { view: String, request: ActionRequest },
}

/// Spawns background tasks for source operations.
///
/// Each spawn clones the channel sender and the source handle, so tasks
/// outlive nothing but the runtime.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
    source: Arc<dyn ResourceSource>,
    timeout: Duration,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(
        tx: mpsc::UnboundedSender<ApiMessage>,
        source: Arc<dyn ResourceSource>,
        timeout: Duration,
    ) -> Self {
        Self {
            tx,
            source,
            timeout,
        }
    }

    /// Spawn a queued job.
    pub fn spawn(&self, job: Job) {
        match job {
            Job::Fetch { view, request } => self.spawn_fetch(view, request),
            Job::Action { view, request } => self.spawn_action(view, request),
        }
    }

    /// Spawn a task to list rows for a view.
    pub fn spawn_fetch(&self, view: String, request: LoadRequest) {
        let tx = self.tx.clone();
        let source = Arc::clone(&self.source);
        let timeout = self.timeout;
        debug!(view = %view, kind = request.kind.name(), "Spawning fetch");
        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, source.list(&request)).await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(_) => Err(timeout_message(timeout)),
            };
            if let Err(e) = &result {
                warn!(view = %view, error = %e, "Fetch failed");
            }
            let _ = tx.send(ApiMessage::RowsFetched {
                view,
                request,
                result,
            });
        });
    }

    /// Spawn a task to perform an action.
    pub fn spawn_action(&self, view: String, request: ActionRequest) {
        let tx = self.tx.clone();
        let source = Arc::clone(&self.source);
        let timeout = self.timeout;
        debug!(view = %view, action = %request.action, "Spawning action");
        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, source.perform(&request)).await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(_) => Err(timeout_message(timeout)),
            };
            if let Err(e) = &result {
                warn!(view = %view, action = %request.action, error = %e, "Action failed");
            }
            let _ = tx.send(ApiMessage::ActionCompleted {
                view,
                action: request.action,
                result,
            });
        });
    }
}

fn timeout_message(timeout: Duration) -> String {
    format!("request timed out after {:?}", timeout)
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel(
    source: Arc<dyn ResourceSource>,
    timeout: Duration,
) -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx, source, timeout))
}
