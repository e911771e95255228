//! # Scene Node
//!
//! A single retained node in the scene graph: its place in the hierarchy, the
//! attributes the renderer assigns to it, and the drawable content it carries.
//!
//! Nodes are tagged with a string id that matches the id of the description
//! they were built from. Each node indexes its children by that id so the
//! renderer can find an existing node without walking the tree.

use crate::SceneNodeId;
use glam::Vec2;
use palette::Srgba;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use strum_macros::Display;

/// 8-bit sRGB color with alpha.
pub type Color = Srgba<u8>;

/// Structural role of a node.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The root of the graph
    Stage,
    /// A top-level compositing layer
    Layer,
    /// A plain container
    Group,
    /// A polyline
    Line,
    /// A filled rectangle
    Rect,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// How a node's pixels combine with what is already drawn beneath it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeOp {
    #[default]
    SourceOver,
    /// Clears destination pixels where the node draws (erasing).
    DestinationOut,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineAttrs {
    /// Flat coordinate list: `[x0, y0, x1, y1, ...]`.
    pub points: Vec<f32>,
    pub stroke: Color,
    pub stroke_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub composite: CompositeOp,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RectAttrs {
    pub position: Vec2,
    pub size: Vec2,
    pub fill: Color,
}

/// Drawable payload of a node. Containers carry none.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum NodeContent {
    #[default]
    None,
    Line(LineAttrs),
    Rect(RectAttrs),
}

/// Called with the node's final position when a drag on it ends.
pub type DragEndHandler = Box<dyn FnMut(Vec2)>;

/// Everything needed to create a node.
#[derive(Clone, Debug)]
pub struct NodeSpec {
    pub(crate) kind: NodeKind,
    pub(crate) id: String,
    pub(crate) name: Option<String>,
    pub(crate) listening: bool,
    pub(crate) draggable: bool,
    pub(crate) drag_distance: f32,
    pub(crate) content: NodeContent,
}

impl NodeSpec {
    pub fn new(kind: NodeKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: None,
            listening: true,
            draggable: false,
            drag_distance: 0.0,
            content: NodeContent::None,
        }
    }

    pub fn layer(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Layer, id)
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Group, id)
    }

    pub fn line(id: impl Into<String>, attrs: LineAttrs) -> Self {
        Self {
            content: NodeContent::Line(attrs),
            ..Self::new(NodeKind::Line, id)
        }
    }

    pub fn rect(id: impl Into<String>, attrs: RectAttrs) -> Self {
        Self {
            content: NodeContent::Rect(attrs),
            ..Self::new(NodeKind::Rect, id)
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn listening(mut self, listening: bool) -> Self {
        self.listening = listening;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Pointer travel, in pixels, before a press turns into a drag.
    pub fn drag_distance(mut self, distance: f32) -> Self {
        self.drag_distance = distance;
        self
    }
}

/// A retained node in the scene graph hierarchy.
pub struct SceneNode {
    pub(crate) kind: NodeKind,

    /// Tag shared with the description this node was built from
    pub(crate) id: String,

    /// Class-like label used for lookups by role (e.g. "the object group")
    pub(crate) name: Option<String>,

    pub(crate) parent: Option<SceneNodeId>,

    /// Children in paint order
    pub(crate) children: Vec<SceneNodeId>,

    /// Children keyed by their tag, kept in step with `children`
    pub(crate) child_index: HashMap<String, SceneNodeId>,

    /// Offset relative to the parent
    pub(crate) position: Vec2,
    pub(crate) visible: bool,
    pub(crate) listening: bool,
    pub(crate) opacity: f32,
    pub(crate) draggable: bool,
    pub(crate) drag_distance: f32,
    pub(crate) content: NodeContent,
    pub(crate) on_drag_end: Option<DragEndHandler>,
}

impl SceneNode {
    pub(crate) fn from_spec(spec: NodeSpec, parent: Option<SceneNodeId>) -> Self {
        Self {
            kind: spec.kind,
            id: spec.id,
            name: spec.name,
            parent,
            children: Vec::new(),
            child_index: HashMap::new(),
            position: Vec2::ZERO,
            visible: true,
            listening: spec.listening,
            opacity: 1.0,
            draggable: spec.draggable,
            drag_distance: spec.drag_distance,
            content: spec.content,
            on_drag_end: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn parent(&self) -> Option<SceneNodeId> {
        self.parent
    }

    pub fn children(&self) -> &[SceneNodeId] {
        &self.children
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn drag_distance(&self) -> f32 {
        self.drag_distance
    }

    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    /// Line points, if this node is a line.
    pub fn points(&self) -> Option<&[f32]> {
        match &self.content {
            NodeContent::Line(line) => Some(&line.points),
            _ => None,
        }
    }

    pub fn rect(&self) -> Option<&RectAttrs> {
        match &self.content {
            NodeContent::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn has_drag_end_handler(&self) -> bool {
        self.on_drag_end.is_some()
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("position", &self.position)
            .field("visible", &self.visible)
            .field("listening", &self.listening)
            .field("opacity", &self.opacity)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}
