use crate::item::{FlattenedItem, ItemId, Projection};

/// Move the element at `from_ix` so that it ends up at `to_ix`.
pub(crate) fn array_move<T: Clone>(items: &[T], from_ix: usize, to_ix: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from_ix >= moved.len() {
        return moved;
    }
    let item = moved.remove(from_ix);
    moved.insert(to_ix.min(moved.len()), item);
    moved
}

/// Number of indentation levels a horizontal drag offset corresponds to.
///
/// Rounds half away from zero.
pub fn drag_depth(offset: f32, indentation_width: f32) -> isize {
    if !indentation_width.is_finite() || indentation_width <= 0.0 || !offset.is_finite() {
        return 0;
    }
    (offset / indentation_width).round() as isize
}

/// Compute where the dragged item would land if it were dropped over `over_id`
/// with the given horizontal offset.
///
/// `items` is the list the user sees, in display order. Nothing is mutated; the
/// reorder is simulated on a copy. Returns `None` when either id is missing.
pub fn get_projection(
    items: &[FlattenedItem],
    active_id: &str,
    over_id: &str,
    drag_offset: f32,
    indentation_width: f32,
) -> Option<Projection> {
    let over_ix = items.iter().position(|item| item.id == over_id)?;
    let active_ix = items.iter().position(|item| item.id == active_id)?;
    let active_item = &items[active_ix];

    let new_items = array_move(items, active_ix, over_ix);
    let previous_item = over_ix.checked_sub(1).and_then(|ix| new_items.get(ix));
    let next_item = new_items.get(over_ix + 1);

    let levels = drag_depth(drag_offset, indentation_width);
    let projected_depth = (active_item.depth as isize).saturating_add(levels);
    let depth = clamp_depth(projected_depth, previous_item, next_item);
    let parent_id = parent_id_for_depth(depth, over_ix, previous_item, &new_items);

    Some(Projection { depth, parent_id })
}

fn clamp_depth(
    depth: isize,
    previous_item: Option<&FlattenedItem>,
    next_item: Option<&FlattenedItem>,
) -> usize {
    let max_depth = previous_item.map_or(0, |item| item.depth + 1);
    let min_depth = next_item.map_or(0, |item| item.depth);

    if depth >= max_depth as isize {
        max_depth
    } else if depth < min_depth as isize {
        min_depth
    } else {
        depth as usize
    }
}

fn parent_id_for_depth(
    depth: usize,
    over_ix: usize,
    previous_item: Option<&FlattenedItem>,
    new_items: &[FlattenedItem],
) -> Option<ItemId> {
    let previous_item = previous_item?;
    if depth == 0 {
        return None;
    }

    if depth == previous_item.depth {
        return previous_item.parent_id.clone();
    }

    if depth > previous_item.depth {
        return Some(previous_item.id.clone());
    }

    new_items[..over_ix]
        .iter()
        .rev()
        .find(|item| item.depth == depth)
        .and_then(|item| item.parent_id.clone())
}
