//! Factories that turn drawable object descriptions into scene nodes.
//!
//! Each factory inserts exactly one new node under `parent`. None of them check
//! whether a node with the same id already exists there; callers look up first.
//! Geometry is passed through as-is.

use glam::Vec2;
use layer_state::{BrushLine, EraserLine, LayerObject, RectShape};
use palette::Srgba;
use scene_graph::{
    CompositeOp, LineAttrs, LineCap, LineJoin, NodeSpec, RectAttrs, SceneGraph, SceneNodeId,
};

pub fn create_brush_line(line: &BrushLine, scene: &mut SceneGraph, parent: SceneNodeId) -> SceneNodeId {
    let attrs = LineAttrs {
        points: line.points.clone(),
        stroke: line.color,
        stroke_width: line.stroke_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        composite: CompositeOp::SourceOver,
    };
    scene.create_node(
        Some(parent),
        NodeSpec::line(line.id.as_str(), attrs).listening(false),
    )
}

pub fn create_eraser_line(line: &EraserLine, scene: &mut SceneGraph, parent: SceneNodeId) -> SceneNodeId {
    // Only the alpha of the stroke matters under destination-out.
    let attrs = LineAttrs {
        points: line.points.clone(),
        stroke: Srgba::new(255, 255, 255, 255),
        stroke_width: line.stroke_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        composite: CompositeOp::DestinationOut,
    };
    scene.create_node(
        Some(parent),
        NodeSpec::line(line.id.as_str(), attrs).listening(false),
    )
}

pub fn rect_attrs(rect: &RectShape) -> RectAttrs {
    RectAttrs {
        position: Vec2::new(rect.x, rect.y),
        size: Vec2::new(rect.width, rect.height),
        fill: rect.color,
    }
}

pub fn create_rect_shape(rect: &RectShape, scene: &mut SceneGraph, parent: SceneNodeId) -> SceneNodeId {
    scene.create_node(
        Some(parent),
        NodeSpec::rect(rect.id.as_str(), rect_attrs(rect)).listening(false),
    )
}

/// Dispatches to the factory matching the object's variant.
pub fn create_object(object: &LayerObject, scene: &mut SceneGraph, parent: SceneNodeId) -> SceneNodeId {
    match object {
        LayerObject::BrushLine(line) => create_brush_line(line, scene, parent),
        LayerObject::EraserLine(line) => create_eraser_line(line, scene, parent),
        LayerObject::RectShape(rect) => create_rect_shape(rect, scene, parent),
    }
}
