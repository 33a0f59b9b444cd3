use std::sync::Arc;

use tracing::trace;

use super::consumer::ConsumerHandle;
use crate::exec::Executor;
use crate::model::WorkspaceItem;

/// Schedules `items` as contiguous batches of at most `chunk_size` and each
/// widget as its own single-item batch, preserving input order across and
/// within batches. Each scheduled unit re-resolves `consumer` and silently
/// drops itself when the consumer is gone.
///
/// Widgets are costlier per unit than icons; dispatching them individually
/// keeps a slow one from stalling a whole batch.
pub fn dispatch_chunked(
    items: Vec<WorkspaceItem>,
    widgets: Vec<WorkspaceItem>,
    chunk_size: usize,
    executor: &dyn Executor,
    consumer: &ConsumerHandle,
) {
    debug_assert!(chunk_size > 0);
    trace!(items = items.len(), widgets = widgets.len(), chunk_size, "dispatching batches");

    // One shared allocation; each batch carries a sub-range into it.
    let items: Arc<[WorkspaceItem]> = items.into();
    let total = items.len();
    let mut start = 0;
    while start < total {
        let end = usize::min(start + chunk_size, total);
        let batch = items.clone();
        let handle = consumer.clone();
        executor.execute(Box::new(move || {
            if let Some(consumer) = handle.resolve() {
                consumer.bind_items(&batch[start..end], false);
            }
        }));
        start = end;
    }

    for widget in widgets {
        let handle = consumer.clone();
        executor.execute(Box::new(move || {
            if let Some(consumer) = handle.resolve() {
                consumer.bind_items(std::slice::from_ref(&widget), false);
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bind::testing::{ConsumerCall, RecordingConsumer, desktop_item, widget_item};
    use crate::exec::serial_queue;

    #[test]
    fn test_thirteen_items_make_batches_of_six_six_one() {
        let (tx, queue) = serial_queue();
        let consumer = RecordingConsumer::new();
        let items: Vec<_> = (1..=13).map(|id| desktop_item(id, 0, 0, 0)).collect();

        dispatch_chunked(items, Vec::new(), 6, &tx, &consumer.handle());
        queue.run_pending();

        let batches: Vec<Vec<u64>> = consumer
            .calls()
            .into_iter()
            .map(|call| match call {
                ConsumerCall::BindItems(ids) => ids,
                other => panic!("unexpected call: {other:?}"),
            })
            .collect();
        assert_eq!(batches, vec![
            (1..=6).collect::<Vec<u64>>(),
            (7..=12).collect::<Vec<u64>>(),
            vec![13],
        ]);
    }

    #[test]
    fn test_each_widget_is_its_own_batch() {
        let (tx, queue) = serial_queue();
        let consumer = RecordingConsumer::new();

        dispatch_chunked(
            vec![desktop_item(1, 0, 0, 0), desktop_item(2, 0, 1, 0)],
            vec![widget_item(10, 0), widget_item(11, 0)],
            6,
            &tx,
            &consumer.handle(),
        );
        queue.run_pending();

        assert_eq!(consumer.calls(), vec![
            ConsumerCall::BindItems(vec![1, 2]),
            ConsumerCall::BindItems(vec![10]),
            ConsumerCall::BindItems(vec![11]),
        ]);
    }

    #[test]
    fn test_expired_consumer_delivers_nothing() {
        let (tx, queue) = serial_queue();

        dispatch_chunked(
            vec![desktop_item(1, 0, 0, 0)],
            vec![widget_item(2, 0)],
            6,
            &tx,
            &ConsumerHandle::expired(),
        );

        // The units are scheduled but each one resolves to a no-op.
        assert_eq!(queue.run_pending(), 2);
    }
}
