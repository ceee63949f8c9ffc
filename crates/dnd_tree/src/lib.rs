//! Reorder a tree through drag and drop on its flattened, indented rows.
//!
//! The tree is shown as a flat list ([`flatten_tree`], [`remove_children_of`]).
//! While an item is dragged, [`get_projection`] turns the hovered row and the
//! horizontal pointer offset into a depth and parent, and on drop the list is
//! reordered and turned back into a tree with [`build_tree`].
//! [`SortableTreeState`] runs that cycle for one gesture at a time.

mod build;
mod config;
mod error;
mod flatten;
mod item;
mod projection;
mod state;
mod tree;
mod value;

pub use build::build_tree;
pub use config::SortableTreeConfig;
pub use error::{Result, TreeError};
pub use flatten::{flatten_tree, remove_children_of};
pub use item::{FlattenedItem, ItemId, Projection, TreeItem};
pub use projection::{drag_depth, get_projection};
pub use state::{DragPhase, DropOutcome, SortableTreeState};
pub use tree::{
    Children, Collapsed, Name, Property, find_item, find_item_deep, get_child_count,
    get_children_ids, remove_item, set_property,
};
pub use value::{load_tree, tree_to_json_pretty, validate_tree};
