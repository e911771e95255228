use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size and zoom of the stage the layers are drawn onto.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub width: f32,
    pub height: f32,
    /// Per-axis zoom factor.
    #[serde(default = "unit_scale")]
    pub scale: Vec2,
}

fn unit_scale() -> Vec2 {
    Vec2::ONE
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 1024.0,
            scale: Vec2::ONE,
        }
    }
}

impl StageConfig {
    /// Stage extent in unscaled canvas units.
    pub fn canvas_extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / self.scale
    }

    /// Converts a pointer position on the stage to canvas units, snapped down
    /// to whole pixels.
    pub fn scaled_floored_cursor(&self, pointer: Vec2) -> Vec2 {
        (pointer / self.scale).floor()
    }

    /// Whether a canvas-space point lies within the stage, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        let extent = self.canvas_extent();
        point.x >= 0.0 && point.y >= 0.0 && point.x <= extent.x && point.y <= extent.y
    }
}
