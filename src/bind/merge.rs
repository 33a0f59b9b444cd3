use tracing::{debug, error, instrument};

use super::chunk::dispatch_chunked;
use super::pipeline::BindPipeline;
use super::stores::SpaceFinder;
use crate::common::collections::HashMap;
use crate::model::{Container, ItemId, ScreenId, WorkspaceItem};

/// New items grouped the way the loader hands them over: top-level icons that
/// need a grid slot, and folder children that bind wherever their folder
/// already lives.
#[derive(Debug, Default)]
pub struct NewWorkspaceItems {
    pub top_level: Vec<WorkspaceItem>,
    pub folder_children: Vec<WorkspaceItem>,
}

impl BindPipeline {
    /// Places `new_items` into open workspace slots, writes them back to the
    /// model, persists them, and binds them through the normal chunked path.
    ///
    /// Placement and the screen-order write-back happen under the model lock
    /// so they cannot interleave with a concurrent snapshot-read.
    #[instrument(skip_all, fields(
        top_level = new_items.top_level.len(),
        children = new_items.folder_children.len(),
    ))]
    pub fn merge_new_items(&self, new_items: NewWorkspaceItems, finder: &dyn SpaceFinder) {
        let NewWorkspaceItems { top_level, folder_children } = new_items;

        let (placed, screens, screens_appended) = self.model.with_model(|model| {
            let mut screen_items: HashMap<ScreenId, Vec<WorkspaceItem>> = HashMap::default();
            for item in &model.workspace_items {
                if item.container == Container::Desktop {
                    screen_items.entry(item.screen).or_default().push(item.clone());
                }
            }

            let mut screen_order = model.workspace_screens.clone();
            let known_screens = screen_order.len();
            let mut pending: Vec<ItemId> = Vec::new();
            let mut placed: Vec<WorkspaceItem> = Vec::new();

            for mut item in top_level {
                let (screen, (cell_x, cell_y)) =
                    finder.find_slot(&screen_items, &mut screen_order, &pending);
                item.container = Container::Desktop;
                item.screen = screen;
                item.cell_x = cell_x;
                item.cell_y = cell_y;

                screen_items.entry(screen).or_default().push(item.clone());
                pending.push(item.id);
                model.workspace_items.push(item.clone());
                placed.push(item);
            }

            // Children bind unconditionally; the folder owns the grid slot.
            for child in folder_children {
                model.workspace_items.push(child.clone());
                placed.push(child);
            }

            let appended = screen_order.len() > known_screens;
            model.workspace_screens = screen_order.clone();
            (placed, screen_order, appended)
        });

        if screens_appended {
            debug!(screens = screens.len(), "screen order grew during placement");
            if let Err(err) = self.store.update_screen_order(&screens) {
                error!("failed to persist screen order: {err}");
            }
            let handle = self.consumer.clone();
            self.ui.execute(Box::new(move || {
                if let Some(consumer) = handle.resolve() {
                    consumer.bind_screens(&screens);
                }
            }));
        }

        if placed.is_empty() {
            return;
        }

        dispatch_chunked(
            placed.clone(),
            Vec::new(),
            self.settings.chunk_size,
            &self.ui,
            &self.consumer,
        );
        for item in &placed {
            if let Err(err) =
                self.store.persist_item(item, item.container, item.screen, item.cell_x, item.cell_y)
            {
                error!(item = item.id.get(), "failed to persist item: {err}");
            }
        }
    }
}
