use crate::item::{ItemId, TreeItem};

/// Find a top-level item by id.
pub fn find_item<'a>(items: &'a [TreeItem], item_id: &str) -> Option<&'a TreeItem> {
    items.iter().find(|item| item.id == item_id)
}

/// Find an item anywhere in the tree by id.
pub fn find_item_deep<'a>(items: &'a [TreeItem], item_id: &str) -> Option<&'a TreeItem> {
    for node in items {
        if node.id == item_id {
            return Some(node);
        }
        if let Some(found) = find_item_deep(&node.children, item_id) {
            return Some(found);
        }
    }
    None
}

/// Collect the ids of every descendant of `item_id`, in pre-order.
///
/// `item_id` itself leads the list when `include_self` is set. Empty when the
/// id is not in the tree.
pub fn get_children_ids(items: &[TreeItem], item_id: &str, include_self: bool) -> Vec<ItemId> {
    let Some(item) = find_item_deep(items, item_id) else {
        return Vec::new();
    };

    let mut ids = Vec::new();
    if include_self {
        ids.push(item.id.clone());
    }
    collect_ids(&item.children, &mut ids);
    ids
}

fn collect_ids(items: &[TreeItem], out: &mut Vec<ItemId>) {
    for node in items {
        out.push(node.id.clone());
        collect_ids(&node.children, out);
    }
}

/// Number of descendants (at any depth) of `item_id`; 0 when absent.
pub fn get_child_count(items: &[TreeItem], item_id: &str) -> usize {
    find_item_deep(items, item_id).map_or(0, |item| count_children(&item.children))
}

fn count_children(items: &[TreeItem]) -> usize {
    items
        .iter()
        .map(|node| 1 + count_children(&node.children))
        .sum()
}

/// Return a copy of the tree with `item_id` and its subtree removed.
pub fn remove_item(items: &[TreeItem], item_id: &str) -> Vec<TreeItem> {
    items
        .iter()
        .filter(|node| node.id != item_id)
        .map(|node| TreeItem {
            id: node.id.clone(),
            name: node.name.clone(),
            children: remove_item(&node.children, item_id),
            collapsed: node.collapsed,
        })
        .collect()
}

/// A field of [`TreeItem`] that [`set_property`] can replace.
pub trait Property {
    type Value;

    fn field(item: &mut TreeItem) -> &mut Self::Value;
}

/// [`TreeItem::name`].
pub struct Name;

/// [`TreeItem::collapsed`].
pub struct Collapsed;

/// [`TreeItem::children`].
pub struct Children;

impl Property for Name {
    type Value = String;

    fn field(item: &mut TreeItem) -> &mut String {
        &mut item.name
    }
}

impl Property for Collapsed {
    type Value = bool;

    fn field(item: &mut TreeItem) -> &mut bool {
        &mut item.collapsed
    }
}

impl Property for Children {
    type Value = Vec<TreeItem>;

    fn field(item: &mut TreeItem) -> &mut Vec<TreeItem> {
        &mut item.children
    }
}

/// Return a copy of the tree where property `P` of `item_id` is replaced by
/// `updater(old)`. The tree is returned unchanged when the id is absent.
///
/// ```ignore
/// let items = set_property::<Collapsed>(&items, "4", |collapsed| !collapsed);
/// ```
pub fn set_property<P: Property>(
    items: &[TreeItem],
    item_id: &str,
    updater: impl FnOnce(&P::Value) -> P::Value,
) -> Vec<TreeItem> {
    let mut items = items.to_vec();
    let mut updater = Some(updater);
    update_recursive::<P, _>(&mut items, item_id, &mut updater);
    items
}

fn update_recursive<P, F>(items: &mut [TreeItem], item_id: &str, updater: &mut Option<F>) -> bool
where
    P: Property,
    F: FnOnce(&P::Value) -> P::Value,
{
    for node in items.iter_mut() {
        if node.id == item_id {
            if let Some(updater) = updater.take() {
                let field = P::field(node);
                let value = updater(field);
                *field = value;
            }
            return true;
        }
        if update_recursive::<P, F>(&mut node.children, item_id, updater) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::dump;

    fn fruit() -> Vec<TreeItem> {
        vec![
            TreeItem::new("1", "Banana")
                .child(TreeItem::new("2", "Cavendish"))
                .child(TreeItem::new("3", "Lady Finger")),
            TreeItem::new("4", "Apple")
                .child(TreeItem::new("5", "Fuji").child(TreeItem::new("6", "Aomori")))
                .child(TreeItem::new("7", "Jonathan")),
            TreeItem::new("8", "Orange"),
        ]
    }

    #[test]
    fn find_item_only_looks_at_top_level() {
        let items = fruit();
        assert_eq!(find_item(&items, "4").map(|i| i.name.as_str()), Some("Apple"));
        assert!(find_item(&items, "5").is_none());
        assert_eq!(
            find_item_deep(&items, "6").map(|i| i.name.as_str()),
            Some("Aomori")
        );
    }

    #[test]
    fn children_ids_are_all_descendants() {
        let items = fruit();
        assert_eq!(get_children_ids(&items, "4", false), ["5", "6", "7"]);
        assert_eq!(get_children_ids(&items, "4", true), ["4", "5", "6", "7"]);
        assert!(get_children_ids(&items, "8", false).is_empty());
        assert_eq!(get_children_ids(&items, "8", true), ["8"]);
        assert!(get_children_ids(&items, "missing", true).is_empty());
    }

    #[test]
    fn child_count_counts_every_level() {
        let items = fruit();
        assert_eq!(get_child_count(&items, "4"), 3);
        assert_eq!(get_child_count(&items, "5"), 1);
        assert_eq!(get_child_count(&items, "8"), 0);
        assert_eq!(get_child_count(&items, "missing"), 0);
    }

    #[test]
    fn remove_nested_item_with_subtree() {
        let items = fruit();
        let removed = remove_item(&items, "5");

        assert_eq!(
            dump(&removed),
            r#"1
  2
  3
4
  7
8"#
        );
        assert_eq!(items, fruit(), "input tree is untouched");
    }

    #[test]
    fn remove_missing_item_is_identity() {
        assert_eq!(remove_item(&fruit(), "missing"), fruit());
    }

    #[test]
    fn set_property_updates_nested_field() {
        let items = fruit();
        let updated = set_property::<Collapsed>(&items, "5", |collapsed| !collapsed);
        assert!(find_item_deep(&updated, "5").unwrap().collapsed);
        assert!(!find_item_deep(&items, "5").unwrap().collapsed);

        let renamed = set_property::<Name>(&updated, "8", |name| format!("{name}!"));
        assert_eq!(find_item_deep(&renamed, "8").unwrap().name, "Orange!");

        let pruned = set_property::<Children>(&renamed, "1", |_| Vec::new());
        assert!(!find_item_deep(&pruned, "1").unwrap().is_folder());
        assert_eq!(get_child_count(&pruned, "4"), 3);
    }

    #[test]
    fn set_property_missing_id_is_identity() {
        let items = fruit();
        assert_eq!(set_property::<Name>(&items, "missing", |_| "x".into()), items);
    }
}
