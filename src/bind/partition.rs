use std::cmp::Ordering;

use crate::common::collections::HashSet;
use crate::common::config::DeviceProfile;
use crate::model::{Container, ItemId, ScreenId, WorkspaceItem};

/// Splits `items` into those directly or transitively on `current` and
/// everything else. Every input lands in exactly one output.
///
/// Hotseat items are always "current". Folder children follow their parent:
/// the single classification pass walks in ascending container order, so a
/// top-level parent (whose container ordinal is a small negative constant) is
/// classified before any child that names it by id, and nested folders
/// resolve transitively as long as parent ids precede child container ids.
pub fn partition_by_screen(
    current: Option<ScreenId>,
    mut items: Vec<WorkspaceItem>,
) -> (Vec<WorkspaceItem>, Vec<WorkspaceItem>) {
    items.sort_by_key(|item| item.container.ordinal());

    let mut current_items = Vec::new();
    let mut other_items = Vec::new();
    let mut on_current: HashSet<ItemId> = HashSet::default();

    for item in items {
        match item.container {
            Container::Desktop => {
                if current == Some(item.screen) {
                    on_current.insert(item.id);
                    current_items.push(item);
                } else {
                    other_items.push(item);
                }
            }
            Container::Hotseat => {
                on_current.insert(item.id);
                current_items.push(item);
            }
            Container::Folder(parent) => {
                if on_current.contains(&parent) {
                    on_current.insert(item.id);
                    current_items.push(item);
                } else {
                    other_items.push(item);
                }
            }
        }
    }

    (current_items, other_items)
}

/// Stable spatial order: hotseat slots first, then desktop pages screen-major,
/// rows before columns within a page.
pub fn sort_spatially(items: &mut [WorkspaceItem], profile: &DeviceProfile) {
    let columns = u64::from(profile.columns);
    let cells = profile.cells_per_screen();
    let desktop_rank = |item: &WorkspaceItem| {
        item.screen.get() * cells + u64::from(item.cell_y) * columns + u64::from(item.cell_x)
    };

    items.sort_by(|lhs, rhs| {
        if lhs.container == rhs.container {
            match lhs.container {
                Container::Desktop => desktop_rank(lhs).cmp(&desktop_rank(rhs)),
                // Hotseat uses the screen id as the slot rank.
                Container::Hotseat => lhs.screen.get().cmp(&rhs.screen.get()),
                Container::Folder(_) => {
                    // Folder contents carry no spatial rank of their own; the
                    // parent's placement is authoritative. Loader output never
                    // ranks two same-folder siblings against each other.
                    debug_assert!(false, "unexpected container when sorting workspace items");
                    Ordering::Equal
                }
            }
        } else {
            lhs.container.ordinal().cmp(&rhs.container.ordinal())
        }
    });
}
