use parking_lot::Mutex;
use tracing::trace;

use super::Executor;
use super::queue::{Job, SerialExecutor};

/// One-shot deferred context for the tail of a bind pass.
///
/// Buffers jobs until the consumer signals its next draw via [`trigger`];
/// the first trigger releases everything buffered, in order, onto the
/// underlying serial queue. From then on it is a transparent FIFO
/// pass-through for the rest of the pass.
///
/// [`trigger`]: OnDrawExecutor::trigger
pub struct OnDrawExecutor {
    inner: SerialExecutor,
    state: Mutex<DeferredState>,
}

struct DeferredState {
    queued: Vec<Job>,
    released: bool,
}

impl OnDrawExecutor {
    pub fn new(inner: SerialExecutor) -> OnDrawExecutor {
        OnDrawExecutor {
            inner,
            state: Mutex::new(DeferredState { queued: Vec::new(), released: false }),
        }
    }

    /// Releases buffered jobs onto the underlying queue. Only the first call
    /// has any effect.
    pub fn trigger(&self) {
        let drained = {
            let mut state = self.state.lock();
            if state.released {
                return;
            }
            state.released = true;
            std::mem::take(&mut state.queued)
        };
        trace!(jobs = drained.len(), "releasing deferred bind work");
        for job in drained {
            self.inner.execute(job);
        }
    }

    pub fn is_released(&self) -> bool {
        self.state.lock().released
    }

    pub fn execute(&self, job: Job) {
        let mut state = self.state.lock();
        if state.released {
            drop(state);
            self.inner.execute(job);
        } else {
            state.queued.push(job);
        }
    }
}

impl Executor for OnDrawExecutor {
    fn execute(&self, job: Job) {
        OnDrawExecutor::execute(self, job);
    }
}
