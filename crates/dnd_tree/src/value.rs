use std::collections::HashSet;

use crate::error::{Result, TreeError};
use crate::item::TreeItem;

/// Parse a tree from its JSON form: an array of
/// `{ "id", "name", "children", "collapsed" }` objects.
///
/// Only the shape is checked; use [`validate_tree`] to reject duplicate ids.
pub fn load_tree(s: &str) -> Result<Vec<TreeItem>> {
    Ok(serde_json::from_str(s)?)
}

pub fn tree_to_json_pretty(items: &[TreeItem]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Check that every id is non-empty and unique across the whole tree.
pub fn validate_tree(items: &[TreeItem]) -> Result<()> {
    let mut seen = HashSet::new();
    validate_recursive(items, &mut seen)
}

fn validate_recursive<'a>(items: &'a [TreeItem], seen: &mut HashSet<&'a str>) -> Result<()> {
    for item in items {
        if item.id.is_empty() {
            return Err(TreeError::EmptyId {
                name: item.name.clone(),
            });
        }
        if !seen.insert(item.id.as_str()) {
            return Err(TreeError::DuplicateId(item.id.clone()));
        }
        validate_recursive(&item.children, seen)?;
    }
    Ok(())
}
