use layer_state::{LayerId, ObjectId};

/// Error type for render passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A layer container exists but its object group does not. The scene is
    /// structurally corrupt; the pass stops without touching objects.
    MissingObjectGroup { layer: LayerId },
    /// Two objects in one layer share an id, so they cannot be told apart.
    /// Detected before any mutation.
    DuplicateObjectId { layer: LayerId, object: ObjectId },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingObjectGroup { layer } => {
                write!(f, "Object group not found for layer {}", layer)
            }
            Self::DuplicateObjectId { layer, object } => {
                write!(f, "Duplicate object id {} in layer {}", object, layer)
            }
        }
    }
}

impl std::error::Error for RenderError {}
