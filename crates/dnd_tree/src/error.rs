use thiserror::Error;

use crate::item::ItemId;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate item id: {0}")]
    DuplicateId(ItemId),
    #[error("item with empty id (name: {name:?})")]
    EmptyId { name: String },
    #[error("indentation width must be a positive number, got {0}")]
    InvalidIndentation(f32),
}

pub type Result<T> = std::result::Result<T, TreeError>;
