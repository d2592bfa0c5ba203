//! Off-thread dispatch of listener notifications.

use crate::error::{GenaError, Result};
use tokio::runtime::Handle;

/// A listener notification waiting to run.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs listener notifications asynchronously, never on the caller's thread.
pub trait ListenerExecutor: Send + Sync {
    fn execute(&self, task: Task);
}

/// Dispatches tasks onto the blocking pool of a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running in.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| GenaError::Configuration(format!("No tokio runtime available: {e}")))
    }
}

impl ListenerExecutor for TokioExecutor {
    fn execute(&self, task: Task) {
        // The JoinHandle is dropped; a panicking listener only takes down its own task.
        self.handle.spawn_blocking(task);
    }
}

/// Executor that queues tasks until told to run them.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct DeferredExecutor {
    queue: parking_lot::Mutex<Vec<Task>>,
}

#[cfg(test)]
impl DeferredExecutor {
    pub(crate) fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    pub(crate) fn run_all(&self) -> usize {
        let tasks: Vec<Task> = std::mem::take(&mut *self.queue.lock());
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

#[cfg(test)]
impl ListenerExecutor for DeferredExecutor {
    fn execute(&self, task: Task) {
        self.queue.lock().push(task);
    }
}
