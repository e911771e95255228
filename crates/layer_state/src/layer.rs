use crate::{LayerId, ObjectId};
use glam::Vec2;
use palette::Srgba;
use serde::{Deserialize, Serialize};

/// 8-bit sRGB color with alpha, as stored in layer state.
pub type Color = Srgba<u8>;

fn opaque_black() -> Color {
    Srgba::new(0, 0, 0, 255)
}

fn default_stroke_width() -> f32 {
    1.0
}

fn default_opacity() -> f32 {
    1.0
}

fn default_enabled() -> bool {
    true
}

/// A freehand stroke painted with the brush.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrushLine {
    pub id: ObjectId,
    /// Flat coordinate list: `[x0, y0, x1, y1, ...]`.
    pub points: Vec<f32>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default = "opaque_black")]
    pub color: Color,
}

/// A freehand stroke that erases whatever is beneath it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EraserLine {
    pub id: ObjectId,
    /// Flat coordinate list: `[x0, y0, x1, y1, ...]`.
    pub points: Vec<f32>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
}

/// A filled axis-aligned rectangle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub id: ObjectId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "opaque_black")]
    pub color: Color,
}

impl RectShape {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// A drawable object inside a raster layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerObject {
    BrushLine(BrushLine),
    EraserLine(EraserLine),
    RectShape(RectShape),
}

impl LayerObject {
    pub fn id(&self) -> &ObjectId {
        match self {
            Self::BrushLine(line) => &line.id,
            Self::EraserLine(line) => &line.id,
            Self::RectShape(rect) => &rect.id,
        }
    }

    /// Stroke points, for the line variants.
    pub fn points(&self) -> Option<&[f32]> {
        match self {
            Self::BrushLine(line) => Some(&line.points),
            Self::EraserLine(line) => Some(&line.points),
            Self::RectShape(_) => None,
        }
    }

    /// Returns a copy of this object under a newly generated id.
    pub fn with_fresh_id(&self) -> Self {
        let mut object = self.clone();
        let id = match &mut object {
            Self::BrushLine(line) => &mut line.id,
            Self::EraserLine(line) => &mut line.id,
            Self::RectShape(rect) => &mut rect.id,
        };
        *id = ObjectId::new();
        object
    }
}

/// The declarative description of a raster layer.
///
/// Produced by application state once per render cycle and never mutated by
/// the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RasterLayer {
    pub id: LayerId,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Drawable objects in paint order (back to front).
    #[serde(default)]
    pub objects: Vec<LayerObject>,
}

impl RasterLayer {
    pub fn new(id: impl Into<LayerId>) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            is_enabled: true,
            opacity: 1.0,
            objects: Vec::new(),
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Position snapped down to whole pixels.
    pub fn floored_position(&self) -> Vec2 {
        self.position().floor()
    }

    /// Opacity clamped to `0.0..=1.0`. NaN is treated as fully opaque.
    pub fn effective_opacity(&self) -> f32 {
        if self.opacity.is_nan() {
            1.0
        } else {
            self.opacity.clamp(0.0, 1.0)
        }
    }

    pub fn object_ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.iter().map(LayerObject::id)
    }

    /// The first object id that appears more than once, if any.
    pub fn duplicate_object_id(&self) -> Option<&ObjectId> {
        let mut seen = std::collections::HashSet::with_capacity(self.objects.len());
        self.object_ids().find(|id| !seen.insert(*id))
    }

    /// Copies this layer under a new layer id, regenerating every object id.
    pub fn duplicated(&self) -> Self {
        Self {
            id: LayerId::new(),
            objects: self.objects.iter().map(LayerObject::with_fresh_id).collect(),
            ..self.clone()
        }
    }
}
