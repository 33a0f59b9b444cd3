//! Shared fixtures for bind tests: a consumer that records every call, an
//! in-memory store, and a naive row-major space finder.

use std::sync::Arc;

use parking_lot::Mutex;

use super::consumer::{ConsumerHandle, WorkspaceConsumer};
use super::stores::{ItemStore, SpaceFinder, StoreError, WidgetCatalogProvider};
use crate::common::collections::HashMap;
use crate::common::config::DeviceProfile;
use crate::exec::OnDrawExecutor;
use crate::model::{
    AppInfo, ComponentKey, Container, ItemId, ItemKind, ScreenId, WidgetRowEntry, WorkspaceItem,
};

pub fn desktop_item(id: u64, screen: u64, cell_x: u32, cell_y: u32) -> WorkspaceItem {
    WorkspaceItem::new(
        ItemId::new(id),
        ItemKind::App,
        format!("item-{id}"),
        Container::Desktop,
        ScreenId::new(screen),
        cell_x,
        cell_y,
    )
}

pub fn hotseat_item(id: u64, slot: u64) -> WorkspaceItem {
    WorkspaceItem::new(
        ItemId::new(id),
        ItemKind::App,
        format!("dock-{id}"),
        Container::Hotseat,
        ScreenId::new(slot),
        0,
        0,
    )
}

pub fn folder_child(id: u64, parent: u64) -> WorkspaceItem {
    WorkspaceItem::new(
        ItemId::new(id),
        ItemKind::App,
        format!("child-{id}"),
        Container::Folder(ItemId::new(parent)),
        ScreenId::new(0),
        0,
        0,
    )
}

pub fn widget_item(id: u64, screen: u64) -> WorkspaceItem {
    WorkspaceItem::new(
        ItemId::new(id),
        ItemKind::Widget,
        format!("widget-{id}"),
        Container::Desktop,
        ScreenId::new(screen),
        0,
        0,
    )
}

pub fn app_info(package: &str, title: &str) -> AppInfo {
    AppInfo {
        title: title.into(),
        icon: None,
        component: ComponentKey::new(package, "Main"),
    }
}

/// Every consumer-visible call, in arrival order. Item batches are recorded
/// as the delivered ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumerCall {
    ClearPendingBinds,
    StartBinding,
    BindScreens(Vec<u64>),
    BindItems(Vec<u64>),
    FinishFirstPageBind { deferred: bool },
    FinishBindingItems,
    PageBoundSynchronously(usize),
    ExecuteOnNextDraw,
    DeepShortcutMap(usize),
    AllApplications(usize),
    AllWidgets(usize),
}

pub struct RecordingConsumer {
    calls: Arc<Mutex<Vec<ConsumerCall>>>,
    current_screen: Mutex<Option<usize>>,
    deferred: Mutex<Option<Arc<OnDrawExecutor>>>,
}

impl RecordingConsumer {
    pub fn new() -> Arc<RecordingConsumer> {
        Arc::new(RecordingConsumer {
            calls: Arc::new(Mutex::new(Vec::new())),
            current_screen: Mutex::new(None),
            deferred: Mutex::new(None),
        })
    }

    pub fn handle(self: &Arc<Self>) -> ConsumerHandle {
        ConsumerHandle::new(self)
    }

    pub fn calls(&self) -> Vec<ConsumerCall> {
        self.calls.lock().clone()
    }

    /// The call log outlives the consumer, for tests that drop it mid-pass.
    pub fn shared_log(&self) -> Arc<Mutex<Vec<ConsumerCall>>> {
        self.calls.clone()
    }

    pub fn set_current_screen(&self, page: Option<usize>) {
        *self.current_screen.lock() = page;
    }

    /// The deferred context captured from `execute_on_next_draw`, if any.
    pub fn take_deferred(&self) -> Option<Arc<OnDrawExecutor>> {
        self.deferred.lock().take()
    }

    fn record(&self, call: ConsumerCall) {
        self.calls.lock().push(call);
    }
}

impl WorkspaceConsumer for RecordingConsumer {
    fn clear_pending_binds(&self) {
        self.record(ConsumerCall::ClearPendingBinds);
    }

    fn start_binding(&self) {
        self.record(ConsumerCall::StartBinding);
    }

    fn bind_screens(&self, ordered: &[ScreenId]) {
        self.record(ConsumerCall::BindScreens(
            ordered.iter().map(|screen| screen.get()).collect(),
        ));
    }

    fn bind_items(&self, batch: &[WorkspaceItem], _first_page_partial: bool) {
        self.record(ConsumerCall::BindItems(
            batch.iter().map(|item| item.id.get()).collect(),
        ));
    }

    fn finish_first_page_bind(&self, deferred: Option<&Arc<OnDrawExecutor>>) {
        self.record(ConsumerCall::FinishFirstPageBind { deferred: deferred.is_some() });
    }

    fn finish_binding_items(&self) {
        self.record(ConsumerCall::FinishBindingItems);
    }

    fn on_page_bound_synchronously(&self, page: usize) {
        self.record(ConsumerCall::PageBoundSynchronously(page));
    }

    fn execute_on_next_draw(&self, deferred: Arc<OnDrawExecutor>) {
        self.record(ConsumerCall::ExecuteOnNextDraw);
        *self.deferred.lock() = Some(deferred);
    }

    fn bind_deep_shortcut_map(&self, map: &HashMap<ComponentKey, Vec<String>>) {
        self.record(ConsumerCall::DeepShortcutMap(map.len()));
    }

    fn bind_all_applications(&self, apps: &[AppInfo]) {
        self.record(ConsumerCall::AllApplications(apps.len()));
    }

    fn bind_all_widgets(&self, widgets: &[WidgetRowEntry]) {
        self.record(ConsumerCall::AllWidgets(widgets.len()));
    }

    fn current_workspace_screen(&self) -> Option<usize> {
        *self.current_screen.lock()
    }
}

/// In-memory store that records every write.
#[derive(Default)]
pub struct RecordingStore {
    pub persisted: Mutex<Vec<ItemId>>,
    pub screen_orders: Mutex<Vec<Vec<u64>>>,
}

impl RecordingStore {
    pub fn new() -> Arc<RecordingStore> {
        Arc::new(RecordingStore::default())
    }
}

impl ItemStore for RecordingStore {
    fn persist_item(
        &self,
        item: &WorkspaceItem,
        _container: Container,
        _screen: ScreenId,
        _cell_x: u32,
        _cell_y: u32,
    ) -> Result<(), StoreError> {
        self.persisted.lock().push(item.id);
        Ok(())
    }

    fn update_screen_order(&self, order: &[ScreenId]) -> Result<(), StoreError> {
        self.screen_orders.lock().push(order.iter().map(|screen| screen.get()).collect());
        Ok(())
    }
}

/// Fills screens in order, row-major, appending `max + 1` when every known
/// screen is full.
pub struct RowSpaceFinder {
    pub profile: DeviceProfile,
}

impl SpaceFinder for RowSpaceFinder {
    fn find_slot(
        &self,
        placements: &HashMap<ScreenId, Vec<WorkspaceItem>>,
        screen_order: &mut Vec<ScreenId>,
        _pending: &[ItemId],
    ) -> (ScreenId, (u32, u32)) {
        let capacity = self.profile.cells_per_screen() as usize;
        for &screen in screen_order.iter() {
            let used = placements.get(&screen).map_or(0, Vec::len);
            if used < capacity {
                let slot = used as u32;
                return (screen, (slot % self.profile.columns, slot / self.profile.columns));
            }
        }

        let next = screen_order.iter().map(|screen| screen.get()).max().unwrap_or(0) + 1;
        let screen = ScreenId::new(next);
        screen_order.push(screen);
        (screen, (0, 0))
    }
}

pub struct FixedCatalog(pub Vec<WidgetRowEntry>);

impl WidgetCatalogProvider for FixedCatalog {
    fn compute_widget_catalog(&self) -> Vec<WidgetRowEntry> {
        self.0.clone()
    }
}
