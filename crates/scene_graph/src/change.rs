use crate::NodeKind;
use glam::Vec2;
use serde::Serialize;

/// One mutation applied to the scene graph.
///
/// Every create, destroy and attribute write is appended to the graph's
/// journal, in the order it happened. Attribute writes are journaled even when
/// the value did not change, so the journal shows exactly which writes a
/// caller issued.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SceneChange {
    Created { id: String, kind: NodeKind },
    Destroyed { id: String, kind: NodeKind },
    Position { id: String, position: Vec2 },
    Listening { id: String, listening: bool },
    Visible { id: String, visible: bool },
    Opacity { id: String, opacity: f32 },
    Points { id: String, count: usize },
    Rect { id: String },
    Reordered { id: String, index: usize },
}

impl SceneChange {
    /// Tag of the node the change applies to.
    pub fn id(&self) -> &str {
        match self {
            Self::Created { id, .. }
            | Self::Destroyed { id, .. }
            | Self::Position { id, .. }
            | Self::Listening { id, .. }
            | Self::Visible { id, .. }
            | Self::Opacity { id, .. }
            | Self::Points { id, .. }
            | Self::Rect { id }
            | Self::Reordered { id, .. } => id,
        }
    }

    /// Whether this change created or destroyed a node.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Destroyed { .. })
    }
}
