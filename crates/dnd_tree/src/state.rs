use std::collections::{BTreeSet, HashSet};

use tracing::{debug, trace};

use crate::build::build_tree;
use crate::config::SortableTreeConfig;
use crate::flatten::{flatten_tree, remove_children_of};
use crate::item::{FlattenedItem, ItemId, Projection, TreeItem};
use crate::projection::{array_move, get_projection};
use crate::tree::{Collapsed, find_item_deep, get_child_count, get_children_ids, set_property};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Where a committed drop placed the dragged item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropOutcome {
    pub item_id: ItemId,
    pub over_id: ItemId,
    pub parent_id: Option<ItemId>,
    pub depth: usize,
    /// Position among the new siblings.
    pub index: usize,
}

/// State for one sortable tree and the drag gesture currently running on it.
///
/// The rendering layer feeds pointer events through [`start`](Self::start),
/// [`move_to`](Self::move_to), [`over`](Self::over), and finally
/// [`end`](Self::end) or [`cancel`](Self::cancel). Only `end` replaces the tree.
#[derive(Clone, Debug, Default)]
pub struct SortableTreeState {
    items: Vec<TreeItem>,
    config: SortableTreeConfig,
    active_id: Option<ItemId>,
    over_id: Option<ItemId>,
    offset_left: f32,
    collapsed_ids: BTreeSet<ItemId>,
}

impl SortableTreeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SortableTreeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn items(mut self, items: impl Into<Vec<TreeItem>>) -> Self {
        self.set_items(items);
        self
    }

    /// Replace the tree. Any gesture in progress is dropped and the collapse
    /// state is taken from the items' `collapsed` flags.
    pub fn set_items(&mut self, items: impl Into<Vec<TreeItem>>) {
        self.items = items.into();
        self.collapsed_ids = flatten_tree(&self.items)
            .into_iter()
            .filter(|item| item.collapsed)
            .map(|item| item.id)
            .collect();
        self.reset_state();
    }

    pub fn root_items(&self) -> &[TreeItem] {
        &self.items
    }

    pub fn settings(&self) -> &SortableTreeConfig {
        &self.config
    }

    pub fn phase(&self) -> DragPhase {
        if self.active_id.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn active_id(&self) -> Option<&ItemId> {
        self.active_id.as_ref()
    }

    pub fn over_id(&self) -> Option<&ItemId> {
        self.over_id.as_ref()
    }

    pub fn offset_left(&self) -> f32 {
        self.offset_left
    }

    pub fn collapsed_ids(&self) -> &BTreeSet<ItemId> {
        &self.collapsed_ids
    }

    pub fn is_collapsed(&self, item_id: &str) -> bool {
        self.collapsed_ids.contains(item_id)
    }

    /// The rows to render: the flattened tree without the descendants of
    /// collapsed items, nor those of the dragged item while a drag is running.
    pub fn flattened_items(&self) -> Vec<FlattenedItem> {
        let flattened = flatten_tree(&self.items);
        let dragged = self
            .active_id
            .iter()
            .filter(|_| self.config.collapse_active_on_drag);
        remove_children_of(&flattened, self.collapsed_ids.iter().chain(dragged))
    }

    pub fn sorted_ids(&self) -> Vec<ItemId> {
        self.flattened_items()
            .into_iter()
            .map(|item| item.id)
            .collect()
    }

    pub fn active_item(&self) -> Option<FlattenedItem> {
        let active_id = self.active_id.as_ref()?;
        self.flattened_items()
            .into_iter()
            .find(|item| item.id == *active_id)
    }

    /// Number of items that travel with the dragged item.
    pub fn active_child_count(&self) -> usize {
        self.active_id
            .as_ref()
            .map_or(0, |active_id| get_child_count(&self.items, active_id))
    }

    /// Where the dragged item would land if dropped now.
    pub fn projected(&self) -> Option<Projection> {
        self.projected_in(&self.flattened_items())
    }

    fn projected_in(&self, visible: &[FlattenedItem]) -> Option<Projection> {
        let active_id = self.active_id.as_ref()?;
        let over_id = self.over_id.as_ref()?;
        let projection = get_projection(
            visible,
            active_id,
            over_id,
            self.offset_left,
            self.config.indentation_width,
        );
        trace!(%active_id, %over_id, offset = self.offset_left, ?projection, "projected drop");
        projection
    }

    /// Depth to draw a row at: the projected depth for the dragged row.
    pub fn display_depth(&self, entry: &FlattenedItem) -> usize {
        if self.active_id.as_ref() == Some(&entry.id)
            && let Some(projection) = self.projected()
        {
            return projection.depth;
        }
        entry.depth
    }

    /// Begin dragging `item_id`.
    ///
    /// A gesture that is already running is discarded first. Ids that are not
    /// currently visible are ignored.
    pub fn start(&mut self, item_id: &str) {
        let Some(entry) = self
            .flattened_items()
            .into_iter()
            .find(|item| item.id == item_id)
        else {
            debug!(item_id, "drag start on unknown item ignored");
            return;
        };

        if let Some(previous) = self.active_id.as_ref() {
            debug!(%previous, "discarding unfinished drag");
        }

        debug!(item_id, depth = entry.depth, "drag start");
        self.active_id = Some(entry.id.clone());
        self.over_id = Some(entry.id);
        self.offset_left = 0.0;
    }

    /// Horizontal pointer delta since the drag started.
    pub fn move_to(&mut self, delta_x: f32) {
        if self.active_id.is_none() {
            return;
        }
        trace!(delta_x, "drag move");
        self.offset_left = delta_x;
    }

    /// The drop target under the pointer, if any.
    pub fn over(&mut self, over_id: Option<&str>) {
        if self.active_id.is_none() {
            return;
        }
        trace!(?over_id, "drag over");
        self.over_id = over_id.map(ItemId::from);
    }

    pub fn cancel(&mut self) {
        if let Some(active_id) = self.active_id.as_ref() {
            debug!(%active_id, "drag cancelled");
        }
        self.reset_state();
    }

    /// Finish the gesture, moving the dragged item to its projected place.
    ///
    /// Returns `None`, leaving the tree as it was, when there is nothing to
    /// drop onto.
    pub fn end(&mut self) -> Option<DropOutcome> {
        let visible = self.flattened_items();
        let projection = self.projected_in(&visible);
        let active_id = self.active_id.take();
        let over_id = self.over_id.take();
        self.reset_state();

        let (Some(projection), Some(active_id), Some(over_id)) = (projection, active_id, over_id)
        else {
            debug!("drag ended without a drop target");
            return None;
        };

        let outcome = self.apply_drop(&visible, active_id, over_id, projection);
        if let Some(outcome) = outcome.as_ref() {
            debug!(
                item_id = %outcome.item_id,
                parent_id = ?outcome.parent_id,
                depth = outcome.depth,
                index = outcome.index,
                "drag committed"
            );
        }
        outcome
    }

    fn apply_drop(
        &mut self,
        visible: &[FlattenedItem],
        active_id: ItemId,
        over_id: ItemId,
        projection: Projection,
    ) -> Option<DropOutcome> {
        let descendant_ids: HashSet<ItemId> = get_children_ids(&self.items, &active_id, false)
            .into_iter()
            .collect();
        let lands_in_own_subtree = descendant_ids.contains(&over_id)
            || projection.parent_id.as_ref().is_some_and(|parent_id| {
                *parent_id == active_id || descendant_ids.contains(parent_id)
            });
        if lands_in_own_subtree {
            debug!(%active_id, %over_id, "drop into own subtree ignored");
            return None;
        }

        // Every visible row leads a block made of itself and the hidden rows
        // that follow it; the dragged item's block also takes its descendants.
        let visible_ids: HashSet<&str> = visible
            .iter()
            .map(|item| item.id.as_str())
            .filter(|id| !descendant_ids.contains(*id))
            .collect();
        let mut blocks: Vec<Vec<FlattenedItem>> = Vec::with_capacity(visible_ids.len());
        for item in flatten_tree(&self.items) {
            if visible_ids.contains(item.id.as_str()) || blocks.is_empty() {
                blocks.push(vec![item]);
            } else if let Some(block) = blocks.last_mut() {
                block.push(item);
            }
        }

        let block_ix = |id: &ItemId| blocks.iter().position(|block| block[0].id == *id);
        let active_ix = block_ix(&active_id)?;
        let over_ix = block_ix(&over_id)?;

        let mut sorted: Vec<FlattenedItem> = array_move(&blocks, active_ix, over_ix)
            .into_iter()
            .flatten()
            .collect();

        let mut depth_delta = 0;
        for item in sorted.iter_mut() {
            if item.id == active_id {
                depth_delta = projection.depth as isize - item.depth as isize;
                item.depth = projection.depth;
                item.parent_id = projection.parent_id.clone();
            } else if descendant_ids.contains(&item.id) {
                item.depth = item.depth.saturating_add_signed(depth_delta);
            }
        }

        self.items = build_tree(&sorted);

        for id in &descendant_ids {
            if self.collapsed_ids.remove(id) {
                self.items = set_property::<Collapsed>(&self.items, id, |_| false);
            }
        }

        let index = flatten_tree(&self.items)
            .into_iter()
            .find(|item| item.id == active_id)
            .map_or(0, |item| item.index);

        Some(DropOutcome {
            item_id: active_id,
            over_id,
            parent_id: projection.parent_id,
            depth: projection.depth,
            index,
        })
    }

    /// Collapse an expanded item or expand a collapsed one.
    ///
    /// Keeps the item's `collapsed` flag in step so that [`root_items`](Self::root_items)
    /// can be persisted as-is.
    pub fn toggle_collapsed(&mut self, item_id: &str) {
        let Some(item) = find_item_deep(&self.items, item_id) else {
            return;
        };
        let id = item.id.clone();
        let collapsed = !self.collapsed_ids.contains(&id);
        if collapsed {
            self.collapsed_ids.insert(id.clone());
        } else {
            self.collapsed_ids.remove(&id);
        }
        self.items = set_property::<Collapsed>(&self.items, &id, |_| collapsed);
    }

    fn reset_state(&mut self) {
        self.active_id = None;
        self.over_id = None;
        self.offset_left = 0.0;
    }
}
