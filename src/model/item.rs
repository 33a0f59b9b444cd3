use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub fn new(id: u64) -> ItemId {
        ItemId(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<ItemId> for u64 {
    fn from(val: ItemId) -> Self {
        val.get()
    }
}

/// Opaque identifier for one page of the desktop. Position in the screen
/// ordering sequence, not the id value, determines navigation order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ScreenId(u64);

impl ScreenId {
    pub fn new(id: u64) -> ScreenId {
        ScreenId(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<ScreenId> for u64 {
    fn from(val: ScreenId) -> Self {
        val.get()
    }
}

/// Identity of an application component, used to key shortcut lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentKey {
    pub package: String,
    pub class: String,
}

impl ComponentKey {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> ComponentKey {
        ComponentKey { package: package.into(), class: class.into() }
    }
}

/// Where an item lives: directly on a desktop page, in the fixed dock row, or
/// inside a folder identified by the folder item's id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    Desktop,
    Hotseat,
    Folder(ItemId),
}

impl Container {
    /// Stable rank used to order both the classification pass and the spatial
    /// sort: hotseat before desktop, both before any folder id. The constants
    /// match the virtual container ids the item store persists.
    pub fn ordinal(&self) -> i64 {
        match self {
            Container::Hotseat => -101,
            Container::Desktop => -100,
            Container::Folder(id) => id.get() as i64,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    App,
    Shortcut,
    Folder,
    Widget,
}

/// One placed entity on the workspace: an icon, shortcut, folder, or widget.
///
/// A folder's screen and cell are authoritative for its contents; children
/// carry `Container::Folder` and inherit current-screen membership from the
/// parent during binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub title: String,
    pub container: Container,
    pub screen: ScreenId,
    pub cell_x: u32,
    pub cell_y: u32,
}

impl WorkspaceItem {
    pub fn new(
        id: ItemId,
        kind: ItemKind,
        title: impl Into<String>,
        container: Container,
        screen: ScreenId,
        cell_x: u32,
        cell_y: u32,
    ) -> WorkspaceItem {
        WorkspaceItem {
            id,
            kind,
            title: title.into(),
            container,
            screen,
            cell_x,
            cell_y,
        }
    }
}

/// A lightweight record for one installed application. Held in the flat app
/// list, unrelated to workspace placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub title: String,
    pub icon: Option<String>,
    pub component: ComponentKey,
}

/// One row of the widget picker catalog: a package header plus the widget
/// titles it provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetRowEntry {
    pub package: String,
    pub widget_titles: Vec<String>,
}
