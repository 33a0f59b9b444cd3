pub mod data_model;
pub mod item;

pub use data_model::{AllAppsList, BgDataModel, BindSnapshot, SharedAppList, SharedModel};
pub use item::{
    AppInfo, ComponentKey, Container, ItemId, ItemKind, ScreenId, WidgetRowEntry, WorkspaceItem,
};
