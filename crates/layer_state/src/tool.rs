use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The active canvas tool.
///
/// Only [`Tool::Move`] lets layers receive pointer events; every other tool is
/// handled at the stage level.
#[derive(
    Default, Debug, Display, EnumString, EnumIter, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Freehand painting with the brush
    #[default]
    Brush,
    /// Freehand erasing
    Eraser,
    /// Dragging out rectangles
    Rect,
    /// Dragging whole layers around
    Move,
    /// Panning and zooming the view
    View,
    /// Adjusting the generation bounding box
    Bbox,
}

impl Tool {
    /// Whether layers should listen for pointer events under this tool.
    pub fn layers_listen(self) -> bool {
        self == Tool::Move
    }
}
