//! Canvas queries - read-only access to canvas state.

use layer_state::{LayerId, RasterLayer, Tool};
use serde::{Deserialize, Serialize};

/// A query for canvas state (read-only).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Get the selected entity.
    GetSelection,

    /// Get a summary of every layer.
    GetLayers,

    /// Get a specific layer by ID.
    GetLayer { id: LayerId },

    /// Get the current tool.
    GetTool,

    /// Get layer count.
    GetLayerCount,
}

/// Response to a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    Selection { id: Option<LayerId> },
    Layers { layers: Vec<LayerInfo> },
    Layer { layer: Option<LayerInfo> },
    Tool { tool: Tool },
    Count { count: usize },
}

/// Serializable layer summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub id: LayerId,
    pub x: f32,
    pub y: f32,
    pub is_enabled: bool,
    pub opacity: f32,
    pub object_count: usize,
}

impl From<&RasterLayer> for LayerInfo {
    fn from(layer: &RasterLayer) -> Self {
        Self {
            id: layer.id.clone(),
            x: layer.x,
            y: layer.y,
            is_enabled: layer.is_enabled,
            opacity: layer.opacity,
            object_count: layer.objects.len(),
        }
    }
}
