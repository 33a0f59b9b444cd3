//! Execution contexts for delivery units: the UI-owning serial queue, the
//! deferred "after next draw" queue, and the producer-facing idle latch.

pub mod idle;
pub mod on_draw;
pub mod queue;

pub use idle::IdleLatch;
pub use on_draw::OnDrawExecutor;
pub use queue::{Job, SerialExecutor, SerialQueue, serial_queue};

/// A context a delivery unit can be scheduled on. Jobs run strictly in
/// enqueue order, one at a time, and must not block on one another.
pub trait Executor {
    fn execute(&self, job: Job);
}
