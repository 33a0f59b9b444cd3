use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use super::item::{AppInfo, ComponentKey, ItemId, ItemKind, ScreenId, WorkspaceItem};
use crate::common::collections::HashMap;

/// All loader-owned collections. Every read and write crosses the single lock
/// held by [`SharedModel`]; the binding pipeline only ever takes value copies.
#[derive(Debug, Default)]
pub struct BgDataModel {
    /// Icons, shortcuts, and folders placed on the workspace.
    pub workspace_items: Vec<WorkspaceItem>,
    /// Widget placements, bound one at a time.
    pub app_widgets: Vec<WorkspaceItem>,
    /// Left-to-right ordering of desktop pages.
    pub workspace_screens: Vec<ScreenId>,
    /// Deep shortcut ids per application component.
    pub deep_shortcut_map: HashMap<ComponentKey, Vec<String>>,
    /// Bumped on every snapshot-read so consumers can discard stale passes.
    pub last_bind_id: u64,
}

/// Point-in-time copy of the model handed to one bind pass. Independently
/// owned; never aliases the model's internal collections.
#[derive(Debug, Clone)]
pub struct BindSnapshot {
    pub items: Vec<WorkspaceItem>,
    pub widgets: Vec<WorkspaceItem>,
    pub screens: Vec<ScreenId>,
    pub bind_id: u64,
}

/// Shared handle to the loader's data model.
#[derive(Clone, Default)]
pub struct SharedModel(Arc<Mutex<BgDataModel>>);

impl SharedModel {
    pub fn new() -> SharedModel {
        SharedModel::default()
    }

    /// Atomic snapshot-read for one bind pass: copies the item, widget, and
    /// screen collections and bumps the bind generation, all under the lock.
    /// A reader sees either a fully pre-mutation or fully post-mutation state.
    pub fn snapshot_for_bind(&self) -> BindSnapshot {
        let mut model = self.0.lock();
        model.last_bind_id += 1;
        trace!(
            bind_id = model.last_bind_id,
            items = model.workspace_items.len(),
            widgets = model.app_widgets.len(),
            "snapshot for bind"
        );
        BindSnapshot {
            items: model.workspace_items.clone(),
            widgets: model.app_widgets.clone(),
            screens: model.workspace_screens.clone(),
            bind_id: model.last_bind_id,
        }
    }

    /// Copies the deep shortcut index under the lock.
    pub fn snapshot_shortcuts(&self) -> HashMap<ComponentKey, Vec<String>> {
        self.0.lock().deep_shortcut_map.clone()
    }

    pub fn add_item(&self, item: WorkspaceItem) {
        let mut model = self.0.lock();
        if item.kind == ItemKind::Widget {
            model.app_widgets.push(item);
        } else {
            model.workspace_items.push(item);
        }
    }

    pub fn remove_item(&self, id: ItemId) {
        let mut model = self.0.lock();
        model.workspace_items.retain(|item| item.id != id);
        model.app_widgets.retain(|item| item.id != id);
    }

    pub fn set_screens(&self, screens: Vec<ScreenId>) {
        self.0.lock().workspace_screens = screens;
    }

    pub fn set_shortcuts(&self, component: ComponentKey, ids: Vec<String>) {
        self.0.lock().deep_shortcut_map.insert(component, ids);
    }

    /// Runs `f` with the model locked. For compound mutations (the placement
    /// merge path) that must not interleave with a snapshot-read.
    pub fn with_model<R>(&self, f: impl FnOnce(&mut BgDataModel) -> R) -> R {
        f(&mut self.0.lock())
    }
}

/// Flat collection of installed applications.
#[derive(Debug, Default)]
pub struct AllAppsList {
    pub data: Vec<AppInfo>,
}

/// Shared handle to the app list, separate from the workspace model.
#[derive(Clone, Default)]
pub struct SharedAppList(Arc<Mutex<AllAppsList>>);

impl SharedAppList {
    pub fn new() -> SharedAppList {
        SharedAppList::default()
    }

    pub fn add(&self, app: AppInfo) {
        self.0.lock().data.push(app);
    }

    pub fn remove_package(&self, package: &str) {
        self.0.lock().data.retain(|app| app.component.package != package);
    }

    /// Shallow copy for a single-unit bind.
    pub fn snapshot(&self) -> Vec<AppInfo> {
        self.0.lock().data.clone()
    }
}
