use std::sync::Arc;
use std::time::{Duration, Instant};

use super::queue::QueueState;

/// One-shot latch the producer waits on before resuming heavy background
/// work. Resolves when the delivery queue has no queued or running jobs;
/// created pre-resolved when no consumer is bound.
pub struct IdleLatch {
    state: Option<Arc<QueueState>>,
}

impl IdleLatch {
    pub(crate) fn for_queue(state: Arc<QueueState>) -> IdleLatch {
        IdleLatch { state: Some(state) }
    }

    /// Latch that is already resolved.
    pub fn resolved() -> IdleLatch {
        IdleLatch { state: None }
    }

    /// Blocks until the queue is idle or `timeout` elapses. Returns whether
    /// the queue was idle when the call returned.
    pub fn wait(&self, timeout: Duration) -> bool {
        let Some(state) = &self.state else { return true };
        let deadline = Instant::now() + timeout;
        let mut pending = state.pending.lock();
        while *pending > 0 {
            if state.idle.wait_until(&mut pending, deadline).timed_out() {
                return *pending == 0;
            }
        }
        true
    }
}
