use std::sync::{Arc, Weak};

use crate::common::collections::HashMap;
use crate::exec::OnDrawExecutor;
use crate::model::{AppInfo, ComponentKey, ScreenId, WidgetRowEntry, WorkspaceItem};

/// The UI-owning side of the bind pipeline.
///
/// Implementations process delivery units one at a time, in enqueue order, on
/// their own thread. A consumer's lifetime is independent of the producer's;
/// the pipeline only ever reaches it through a [`ConsumerHandle`].
pub trait WorkspaceConsumer: Send + Sync {
    /// Drops any delivery units still queued from a previous pass.
    fn clear_pending_binds(&self);

    fn start_binding(&self);

    fn bind_screens(&self, ordered: &[ScreenId]);

    /// Delivers one contiguous batch of items, in spatial order.
    fn bind_items(&self, batch: &[WorkspaceItem], first_page_partial: bool);

    /// End of the synchronously bound first page. `deferred` carries the
    /// context the rest of the pass will run on, when one is in play.
    fn finish_first_page_bind(&self, deferred: Option<&Arc<OnDrawExecutor>>);

    /// Exactly one per pass, strictly after every item batch.
    fn finish_binding_items(&self);

    fn on_page_bound_synchronously(&self, page: usize);

    /// Asks the consumer to call [`OnDrawExecutor::trigger`] at its next draw.
    fn execute_on_next_draw(&self, deferred: Arc<OnDrawExecutor>);

    fn bind_deep_shortcut_map(&self, map: &HashMap<ComponentKey, Vec<String>>);

    fn bind_all_applications(&self, apps: &[AppInfo]);

    fn bind_all_widgets(&self, widgets: &[WidgetRowEntry]);

    /// Index of the screen the consumer currently shows, if it knows one.
    fn current_workspace_screen(&self) -> Option<usize>;
}

/// Non-owning, revocable reference to the consumer.
///
/// Every delivery unit resolves the handle before acting; a failed resolution
/// is not an error, the consumer has legitimately gone away and the unit is a
/// silent no-op.
#[derive(Clone)]
pub struct ConsumerHandle(Option<Weak<dyn WorkspaceConsumer>>);

impl ConsumerHandle {
    pub fn new<C: WorkspaceConsumer + 'static>(consumer: &Arc<C>) -> ConsumerHandle {
        ConsumerHandle(Some(Arc::downgrade(consumer) as Weak<dyn WorkspaceConsumer>))
    }

    /// A handle that never resolves.
    pub fn expired() -> ConsumerHandle {
        ConsumerHandle(None)
    }

    pub fn resolve(&self) -> Option<Arc<dyn WorkspaceConsumer>> {
        self.0.as_ref()?.upgrade()
    }
}

impl std::fmt::Debug for ConsumerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ConsumerHandle(...)")
    }
}
