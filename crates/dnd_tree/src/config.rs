use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};

const DEFAULT_INDENTATION_WIDTH: f32 = 50.0;

fn default_indentation_width() -> f32 {
    DEFAULT_INDENTATION_WIDTH
}

fn default_true() -> bool {
    true
}

/// Settings for a [`SortableTreeState`](crate::SortableTreeState).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortableTreeConfig {
    /// Horizontal distance that corresponds to one level of nesting.
    ///
    /// This should match the indentation used by your row renderer.
    #[serde(default = "default_indentation_width")]
    pub indentation_width: f32,
    /// Hide the dragged item's subtree while a gesture is in progress.
    #[serde(default = "default_true")]
    pub collapse_active_on_drag: bool,
}

impl Default for SortableTreeConfig {
    fn default() -> Self {
        Self {
            indentation_width: DEFAULT_INDENTATION_WIDTH,
            collapse_active_on_drag: true,
        }
    }
}

impl SortableTreeConfig {
    pub fn indentation_width(mut self, indentation_width: f32) -> Self {
        self.indentation_width = indentation_width;
        self
    }

    pub fn collapse_active_on_drag(mut self, collapse: bool) -> Self {
        self.collapse_active_on_drag = collapse;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.indentation_width.is_finite() || self.indentation_width <= 0.0 {
            return Err(TreeError::InvalidIndentation(self.indentation_width));
        }
        Ok(())
    }

    /// Parse and validate a config; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
