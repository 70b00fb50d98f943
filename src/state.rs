//! Shared application state

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::Config;
use crate::db::JudgeStore;
use crate::execution::ExecutionBackend;
use crate::judge::{JudgeQueue, TestRunOrchestrator};

/// Shared application state, cheap to clone
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn JudgeStore>,
    backend: Arc<dyn ExecutionBackend>,
    queue: JudgeQueue,
    config: Config,
}

impl AppState {
    /// Build application state and the judge queue's receiver half. The
    /// caller hands the receiver to [`crate::judge::spawn_workers`].
    pub fn new(
        store: Arc<dyn JudgeStore>,
        backend: Arc<dyn ExecutionBackend>,
        config: Config,
    ) -> (Self, mpsc::Receiver<Uuid>) {
        let (queue, receiver) = JudgeQueue::new(config.judge.queue_capacity);
        let state = Self {
            inner: Arc::new(AppStateInner {
                store,
                backend,
                queue,
                config,
            }),
        };
        (state, receiver)
    }

    pub fn store(&self) -> &dyn JudgeStore {
        self.inner.store.as_ref()
    }

    pub fn backend(&self) -> Arc<dyn ExecutionBackend> {
        Arc::clone(&self.inner.backend)
    }

    pub fn queue(&self) -> &JudgeQueue {
        &self.inner.queue
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Orchestrator configured from the judge settings. Constructed per
    /// call; it holds nothing but an Arc and two numbers.
    pub fn orchestrator(&self) -> TestRunOrchestrator {
        TestRunOrchestrator::new(self.backend(), &self.inner.config.judge)
    }
}
