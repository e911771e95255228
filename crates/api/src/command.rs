//! Canvas commands - all operations that modify canvas state.
//!
//! Commands are intent-based: they describe what the user wants,
//! not how to achieve it.

use crate::Target;
use layer_state::{LayerId, Tool};
use serde::{Deserialize, Serialize};

/// A command that modifies canvas state.
///
/// Commands are serializable so they can be recorded, scripted or sent from
/// the CLI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Entities ===
    /// Duplicate the target entity and select the copy.
    DuplicateEntity {
        #[serde(default)]
        target: Target,
    },

    /// Show or hide the target entity.
    SetEntityEnabled {
        #[serde(default)]
        target: Target,
        enabled: bool,
    },

    /// Set a layer's position, e.g. after it was dragged.
    SetLayerPosition { id: LayerId, x: f32, y: f32 },

    // === Selection ===
    /// Select an entity.
    SelectEntity { id: LayerId },

    /// Clear the current selection.
    ClearSelection,

    // === Tool ===
    /// Switch the active tool.
    SetTool { tool: Tool },

    // === Batch ===
    /// Execute multiple commands in sequence.
    Batch { commands: Vec<Command> },
}

/// Result of executing a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    /// Command succeeded.
    Success {
        /// IDs of entities created, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        created: Vec<LayerId>,
        /// IDs of entities modified, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modified: Vec<LayerId>,
    },
    /// Command failed.
    Error { message: String },
}

impl CommandResult {
    pub fn success() -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
        }
    }

    pub fn created(ids: Vec<LayerId>) -> Self {
        Self::Success {
            created: ids,
            modified: vec![],
        }
    }

    pub fn modified(ids: Vec<LayerId>) -> Self {
        Self::Success {
            created: vec![],
            modified: ids,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
