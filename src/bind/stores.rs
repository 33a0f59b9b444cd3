//! Narrow interfaces to the collaborators the pipeline consumes: the
//! persistent item store, the grid space finder, and the widget catalog.

use thiserror::Error;

use crate::common::collections::HashMap;
use crate::model::{Container, ItemId, ScreenId, WidgetRowEntry, WorkspaceItem};

/// Failure writing to the external item store. Store errors never abort a
/// bind pass; the pipeline logs them and keeps delivering.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Write side of the external item store.
pub trait ItemStore: Send + Sync {
    fn persist_item(
        &self,
        item: &WorkspaceItem,
        container: Container,
        screen: ScreenId,
        cell_x: u32,
        cell_y: u32,
    ) -> Result<(), StoreError>;

    fn update_screen_order(&self, order: &[ScreenId]) -> Result<(), StoreError>;
}

/// Finds an open grid slot for a new item, appending a fresh screen to
/// `screen_order` when nothing fits. `pending` carries the ids placed earlier
/// in the same merge.
pub trait SpaceFinder {
    fn find_slot(
        &self,
        placements: &HashMap<ScreenId, Vec<WorkspaceItem>>,
        screen_order: &mut Vec<ScreenId>,
        pending: &[ItemId],
    ) -> (ScreenId, (u32, u32));
}

/// Derives the widget picker catalog from installed providers.
pub trait WidgetCatalogProvider {
    fn compute_widget_catalog(&self) -> Vec<WidgetRowEntry>;
}
