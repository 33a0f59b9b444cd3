use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::{Condvar, Mutex};

use super::Executor;
use super::idle::IdleLatch;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Queued plus in-flight job count, shared between both sides of the queue
/// and any idle latches handed to the producer.
pub(crate) struct QueueState {
    pub(crate) pending: Mutex<usize>,
    pub(crate) idle: Condvar,
}

impl QueueState {
    pub(crate) fn job_done(&self) {
        let mut pending = self.pending.lock();
        *pending -= 1;
        if *pending == 0 {
            self.idle.notify_all();
        }
    }
}

/// Producer-side handle to the UI serial queue. Clone freely; jobs from all
/// handles interleave in send order.
#[derive(Clone)]
pub struct SerialExecutor {
    tx: Sender<Job>,
    state: Arc<QueueState>,
}

/// Consumer side of the queue; drained on the UI-owning thread.
pub struct SerialQueue {
    rx: Receiver<Job>,
    state: Arc<QueueState>,
}

pub fn serial_queue() -> (SerialExecutor, SerialQueue) {
    let (tx, rx) = unbounded();
    let state = Arc::new(QueueState { pending: Mutex::new(0), idle: Condvar::new() });
    (SerialExecutor { tx, state: state.clone() }, SerialQueue { rx, state })
}

impl SerialExecutor {
    pub fn execute(&self, job: Job) {
        // Count before sending so an idle waiter never observes a gap between
        // enqueue and receive.
        *self.state.pending.lock() += 1;
        if self.tx.send(job).is_err() {
            // Queue side is gone; the job is dropped, same as an expired
            // consumer.
            self.state.job_done();
        }
    }

    /// Latch that resolves once this queue has no queued or running jobs.
    pub fn idle_latch(&self) -> IdleLatch {
        IdleLatch::for_queue(self.state.clone())
    }
}

impl Executor for SerialExecutor {
    fn execute(&self, job: Job) {
        SerialExecutor::execute(self, job);
    }
}

impl std::fmt::Debug for SerialExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SerialExecutor(...)")
    }
}

impl SerialQueue {
    /// Runs every job currently queued, in enqueue order, then returns how
    /// many ran. Jobs enqueued while draining are picked up in the same call.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            self.state.job_done();
            ran += 1;
        }
        ran
    }

    /// Processes jobs until every [`SerialExecutor`] handle has been dropped.
    pub fn run(&self) {
        while let Ok(job) = self.rx.recv() {
            job();
            self.state.job_done();
        }
    }

    pub fn is_idle(&self) -> bool {
        *self.state.pending.lock() == 0
    }
}
