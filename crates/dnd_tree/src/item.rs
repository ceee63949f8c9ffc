use std::{borrow::Borrow, fmt, ops::Deref, sync::Arc};

use serde::{Deserialize, Serialize};

/// Identifier of a tree item. Cheap to clone.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Arc<str>);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ItemId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// A tree item with children, and a collapsed state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub children: Vec<TreeItem>,
    #[serde(default)]
    pub collapsed: bool,
}

impl TreeItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
            collapsed: false,
        }
    }

    pub fn child(mut self, child: TreeItem) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl Into<Vec<TreeItem>>) -> Self {
        self.children.extend(children.into());
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn is_folder(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A flat representation of a tree item with its depth, parent and sibling index.
///
/// `children` still holds the item's subtree as it was when flattened; the
/// rebuilder ignores it and reconstructs children from `parent_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlattenedItem {
    pub id: ItemId,
    pub name: String,
    pub children: Vec<TreeItem>,
    pub collapsed: bool,
    pub depth: usize,
    pub parent_id: Option<ItemId>,
    pub index: usize,
}

impl FlattenedItem {
    /// The bare node carried by this entry, without its children.
    pub fn to_leaf(&self) -> TreeItem {
        TreeItem {
            id: self.id.clone(),
            name: self.name.clone(),
            children: Vec::new(),
            collapsed: self.collapsed,
        }
    }
}

/// Tree ids, one per line, indented two spaces per level.
#[cfg(test)]
pub(crate) fn dump(items: &[TreeItem]) -> String {
    fn walk(items: &[TreeItem], depth: usize, out: &mut String) {
        for node in items {
            out.push_str(&"  ".repeat(depth));
            out.push_str(node.id.as_str());
            out.push('\n');
            walk(&node.children, depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(items, 0, &mut out);
    out.trim_end().to_string()
}

/// Candidate placement of the dragged item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection {
    pub depth: usize,
    pub parent_id: Option<ItemId>,
}
