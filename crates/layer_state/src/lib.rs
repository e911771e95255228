//! Declarative layer state for the raster canvas.
//!
//! These are plain values produced by application state once per render
//! cycle. Renderers read them; nothing in this crate knows about scene nodes.

mod ids;
mod layer;
mod stage;
mod tool;

pub use ids::{LayerId, ObjectId};
pub use layer::{BrushLine, Color, EraserLine, LayerObject, RasterLayer, RectShape};
pub use stage::StageConfig;
pub use tool::Tool;
