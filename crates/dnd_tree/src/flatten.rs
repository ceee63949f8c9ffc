use std::collections::HashSet;

use crate::item::{FlattenedItem, ItemId, TreeItem};

/// Flatten a tree into a pre-order list annotated with depth, parent id and
/// sibling index.
pub fn flatten_tree(items: &[TreeItem]) -> Vec<FlattenedItem> {
    let mut entries = Vec::new();
    add_entries(&mut entries, items, None, 0);
    entries
}

fn add_entries(
    entries: &mut Vec<FlattenedItem>,
    items: &[TreeItem],
    parent_id: Option<&ItemId>,
    depth: usize,
) {
    for (index, item) in items.iter().enumerate() {
        entries.push(FlattenedItem {
            id: item.id.clone(),
            name: item.name.clone(),
            children: item.children.clone(),
            collapsed: item.collapsed,
            depth,
            parent_id: parent_id.cloned(),
            index,
        });
        add_entries(entries, &item.children, Some(&item.id), depth + 1);
    }
}

/// Drop the descendants of every id in `parent_ids` from a flat list.
///
/// A dropped entry's own id joins the exclusion set, so a single left-to-right
/// pass removes whole subtrees. Requires parent-before-child order.
pub fn remove_children_of<I, S>(items: &[FlattenedItem], parent_ids: I) -> Vec<FlattenedItem>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut excluded: HashSet<String> = parent_ids
        .into_iter()
        .map(|id| id.as_ref().to_owned())
        .collect();

    items
        .iter()
        .filter(|item| {
            let hidden = item
                .parent_id
                .as_ref()
                .is_some_and(|parent_id| excluded.contains(parent_id.as_str()));
            if hidden {
                excluded.insert(item.id.to_string());
            }
            !hidden
        })
        .cloned()
        .collect()
}
