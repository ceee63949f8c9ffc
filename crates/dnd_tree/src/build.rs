use std::collections::HashMap;

use tracing::warn;

use crate::item::{FlattenedItem, TreeItem};

/// Rebuild a tree from a flat list.
///
/// Each entry is attached to the node named by its `parent_id`, in list order,
/// so the list must name every parent before its children. The `children`
/// carried by the entries are ignored.
///
/// An entry whose parent has not been seen yet breaks that precondition; it is
/// kept at the top level instead of being dropped.
pub fn build_tree(items: &[FlattenedItem]) -> Vec<TreeItem> {
    let mut nodes: Vec<Option<TreeItem>> = Vec::with_capacity(items.len());
    let mut child_ixs: Vec<Vec<usize>> = Vec::with_capacity(items.len());
    let mut root_ixs = Vec::new();
    let mut lookup: HashMap<&str, usize> = HashMap::with_capacity(items.len());

    for item in items {
        let ix = nodes.len();
        match item.parent_id.as_ref() {
            None => root_ixs.push(ix),
            Some(parent_id) => match lookup.get(parent_id.as_str()) {
                Some(&parent_ix) => child_ixs[parent_ix].push(ix),
                None => {
                    warn!(
                        id = %item.id,
                        parent_id = %parent_id,
                        "parent is not listed before child; keeping item at top level"
                    );
                    root_ixs.push(ix);
                }
            },
        }

        nodes.push(Some(item.to_leaf()));
        child_ixs.push(Vec::new());
        lookup.insert(item.id.as_str(), ix);
    }

    // Children always sit after their parent, so walking backwards finishes
    // every subtree before its parent takes it.
    for ix in (0..nodes.len()).rev() {
        let children: Vec<TreeItem> = std::mem::take(&mut child_ixs[ix])
            .into_iter()
            .filter_map(|child_ix| nodes[child_ix].take())
            .collect();
        if let Some(node) = nodes[ix].as_mut() {
            node.children = children;
        }
    }

    root_ixs
        .into_iter()
        .filter_map(|ix| nodes[ix].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten_tree;
    use crate::item::{ItemId, dump};

    fn entry(id: &str, parent_id: Option<&str>, depth: usize) -> FlattenedItem {
        FlattenedItem {
            id: id.into(),
            name: id.to_uppercase(),
            children: Vec::new(),
            collapsed: false,
            depth,
            parent_id: parent_id.map(ItemId::from),
            index: 0,
        }
    }

    #[test]
    fn round_trips_a_flattened_tree() {
        let tree = vec![
            TreeItem::new("1", "Banana")
                .child(TreeItem::new("2", "Cavendish"))
                .child(TreeItem::new("3", "Lady Finger").collapsed(true)),
            TreeItem::new("4", "Apple").child(TreeItem::new("5", "Fuji")),
            TreeItem::new("7", "Orange"),
        ];
        assert_eq!(build_tree(&flatten_tree(&tree)), tree);
    }

    #[test]
    fn attaches_by_parent_id_not_position() {
        let items = vec![
            entry("a", None, 0),
            entry("b", None, 0),
            entry("c", Some("a"), 1),
            entry("d", Some("b"), 1),
            entry("e", Some("a"), 1),
        ];
        assert_eq!(
            dump(&build_tree(&items)),
            r#"a
  c
  e
b
  d"#
        );
    }

    #[test]
    fn ignores_stale_children() {
        let mut leaf = entry("a", None, 0);
        leaf.children = vec![TreeItem::new("ghost", "ghost")];
        assert_eq!(build_tree(&[leaf]), vec![TreeItem::new("a", "A")]);
    }

    #[test]
    fn unregistered_parent_is_kept_at_top_level() {
        let items = vec![entry("child", Some("parent"), 1), entry("parent", None, 0)];
        let tree = build_tree(&items);
        let ids: Vec<_> = tree.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["child", "parent"]);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn empty_list_builds_empty_tree() {
        assert!(build_tree(&[]).is_empty());
    }
}
