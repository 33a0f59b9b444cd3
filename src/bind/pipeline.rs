use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::chunk::dispatch_chunked;
use super::consumer::ConsumerHandle;
use super::partition::{partition_by_screen, sort_spatially};
use super::stores::{ItemStore, WidgetCatalogProvider};
use crate::common::config::Settings;
use crate::exec::{Executor, IdleLatch, OnDrawExecutor, SerialExecutor};
use crate::model::{SharedAppList, SharedModel};

/// Delivers the results of one loader pass to the UI-owning consumer.
///
/// The pipeline never mutates the shared model during a bind; it works on
/// point-in-time copies taken under the model lock. All consumer-visible
/// calls for one pass are scheduled in a fixed relative order; work scheduled
/// on the deferred context never runs before earlier work on the immediate
/// queue.
pub struct BindPipeline {
    pub(super) ui: SerialExecutor,
    pub(super) model: SharedModel,
    pub(super) all_apps: SharedAppList,
    pub(super) settings: Settings,
    pub(super) page_to_bind_first: Option<usize>,
    pub(super) consumer: ConsumerHandle,
    pub(super) store: Arc<dyn ItemStore>,
}

impl BindPipeline {
    pub fn new(
        ui: SerialExecutor,
        model: SharedModel,
        all_apps: SharedAppList,
        settings: Settings,
        page_to_bind_first: Option<usize>,
        consumer: ConsumerHandle,
        store: Arc<dyn ItemStore>,
    ) -> BindPipeline {
        BindPipeline {
            ui,
            model,
            all_apps,
            settings,
            page_to_bind_first,
            consumer,
            store,
        }
    }

    /// Runs the full bind-workspace protocol for one snapshot: current page
    /// first on the immediate queue, the rest behind the next-draw trigger.
    #[instrument(skip(self))]
    pub fn bind_workspace(&self) {
        // Only used to resolve the current page. Delivery units re-resolve
        // the handle themselves so nothing here keeps the consumer alive.
        let Some(consumer) = self.consumer.resolve() else {
            warn!("bind pass requested with no consumer attached");
            return;
        };

        let snapshot = self.model.snapshot_for_bind();

        // An out-of-range page (the screen set may have changed since the
        // hint was taken) degrades to "no valid current page".
        let current_page = self
            .page_to_bind_first
            .or_else(|| consumer.current_workspace_screen())
            .filter(|&page| page < snapshot.screens.len());
        drop(consumer);

        let current_screen = current_page.map(|page| snapshot.screens[page]);
        debug!(
            bind_id = snapshot.bind_id,
            ?current_screen,
            items = snapshot.items.len(),
            widgets = snapshot.widgets.len(),
            "starting bind pass"
        );

        let (mut current_items, mut other_items) =
            partition_by_screen(current_screen, snapshot.items);
        let (current_widgets, other_widgets) =
            partition_by_screen(current_screen, snapshot.widgets);
        sort_spatially(&mut current_items, &self.settings.device);
        sort_spatially(&mut other_items, &self.settings.device);

        let handle = self.consumer.clone();
        self.ui.execute(Box::new(move || {
            if let Some(consumer) = handle.resolve() {
                consumer.clear_pending_binds();
                consumer.start_binding();
            }
        }));

        let handle = self.consumer.clone();
        let screens = snapshot.screens;
        self.ui.execute(Box::new(move || {
            if let Some(consumer) = handle.resolve() {
                consumer.bind_screens(&screens);
            }
        }));

        dispatch_chunked(
            current_items,
            current_widgets,
            self.settings.chunk_size,
            &self.ui,
            &self.consumer,
        );

        // With a valid first page, only that page binds synchronously; the
        // rest waits for the consumer's next draw so the first page becomes
        // visible without jank. Without one, everything binds in sequence on
        // the immediate queue.
        let deferred = current_page.map(|_| Arc::new(OnDrawExecutor::new(self.ui.clone())));

        let handle = self.consumer.clone();
        let deferred_for_finish = deferred.clone();
        self.ui.execute(Box::new(move || {
            if let Some(consumer) = handle.resolve() {
                consumer.finish_first_page_bind(deferred_for_finish.as_ref());
            }
        }));

        let deferred_exec: &dyn Executor = match &deferred {
            Some(deferred) => deferred.as_ref() as &dyn Executor,
            None => &self.ui,
        };
        dispatch_chunked(
            other_items,
            other_widgets,
            self.settings.chunk_size,
            deferred_exec,
            &self.consumer,
        );

        // Enqueued last on the deferred context, so it lands strictly after
        // every remaining batch.
        let handle = self.consumer.clone();
        deferred_exec.execute(Box::new(move || {
            if let Some(consumer) = handle.resolve() {
                consumer.finish_binding_items();
            }
        }));

        if let (Some(page), Some(deferred)) = (current_page, deferred) {
            let handle = self.consumer.clone();
            self.ui.execute(Box::new(move || {
                if let Some(consumer) = handle.resolve() {
                    consumer.on_page_bound_synchronously(page);
                    consumer.execute_on_next_draw(deferred);
                }
            }));
        }
    }

    /// Copies the deep-shortcut index under the model lock and delivers it as
    /// one unit.
    pub fn bind_deep_shortcuts(&self) {
        let map = self.model.snapshot_shortcuts();
        let handle = self.consumer.clone();
        self.ui.execute(Box::new(move || {
            if let Some(consumer) = handle.resolve() {
                consumer.bind_deep_shortcut_map(&map);
            }
        }));
    }

    /// Delivers a shallow copy of the app list as one unit.
    pub fn bind_all_apps(&self) {
        let apps = self.all_apps.snapshot();
        let handle = self.consumer.clone();
        self.ui.execute(Box::new(move || {
            if let Some(consumer) = handle.resolve() {
                consumer.bind_all_applications(&apps);
            }
        }));
    }

    /// Computes the widget catalog and delivers it as one unit.
    pub fn bind_widgets(&self, catalog: &dyn WidgetCatalogProvider) {
        let widgets = catalog.compute_widget_catalog();
        let handle = self.consumer.clone();
        self.ui.execute(Box::new(move || {
            if let Some(consumer) = handle.resolve() {
                consumer.bind_all_widgets(&widgets);
            }
        }));
    }

    /// One-shot latch the producer can wait on before resuming background
    /// work. Pre-resolved when no consumer is bound; there is nothing to wait
    /// for in that case.
    pub fn new_idle_latch(&self) -> IdleLatch {
        if self.consumer.resolve().is_none() {
            return IdleLatch::resolved();
        }
        self.ui.idle_latch()
    }
}
