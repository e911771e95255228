//! The canvas store that commands act on.

use layer_state::{LayerId, RasterLayer, StageConfig, Tool};
use serde::{Deserialize, Serialize};

/// Application state for the raster canvas.
///
/// This is also the on-disk document shape read by the CLI.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasState {
    #[serde(default)]
    pub stage: StageConfig,

    #[serde(default)]
    pub tool: Tool,

    /// The selected entity, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<LayerId>,

    /// Raster layers, bottom to top.
    #[serde(default)]
    pub layers: Vec<RasterLayer>,
}

impl CanvasState {
    pub fn new(layers: Vec<RasterLayer>) -> Self {
        Self {
            layers,
            ..Self::default()
        }
    }

    pub fn layer(&self, id: &LayerId) -> Option<&RasterLayer> {
        self.layers.iter().find(|layer| &layer.id == id)
    }

    pub fn layer_mut(&mut self, id: &LayerId) -> Option<&mut RasterLayer> {
        self.layers.iter_mut().find(|layer| &layer.id == id)
    }

    pub fn index_of(&self, id: &LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| &layer.id == id)
    }

    /// The selected layer, if the selection points at one that exists.
    pub fn selected_layer(&self) -> Option<&RasterLayer> {
        self.selected.as_ref().and_then(|id| self.layer(id))
    }
}
