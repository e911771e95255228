//! # Scene Graph System
//!
//! A retained-mode scene graph: a tree of mutable, persistent nodes that a
//! renderer keeps in agreement with declarative state instead of rebuilding
//! every frame.
//!
//! ## Key Concepts
//!
//! - **Arena storage**: nodes live in a [`SlotMap`] and are addressed by
//!   generational [`SceneNodeId`] handles, so stale handles never alias a
//!   newer node.
//! - **Id index**: every node tags itself with the string id of the
//!   description it mirrors, and each parent keeps a map from tag to child.
//!   Finding an existing node is a hash lookup, not a tree search.
//! - **Change journal**: every create, destroy and attribute write is recorded
//!   as a [`SceneChange`] until drained, which makes the graph's mutation
//!   history observable.
//!
//! The graph is single-writer by construction: every mutation takes
//! `&mut self`.

mod change;
pub mod scene_node;

pub use change::SceneChange;
pub use scene_node::{
    Color, CompositeOp, DragEndHandler, LineAttrs, LineCap, LineJoin, NodeContent, NodeKind,
    NodeSpec, RectAttrs, SceneNode,
};

use glam::Vec2;
use serde::Serialize;
use slotmap::{KeyData, SlotMap};
use std::fmt::{self, Display};

slotmap::new_key_type! {
/// Defines a unique identifier for nodes within the scene graph.
    pub struct SceneNodeId;
}

impl From<u64> for SceneNodeId {
    fn from(value: u64) -> Self {
        Self(KeyData::from_ffi(value))
    }
}

impl SceneNodeId {
    /// Converts this scene node id to a [u64]
    pub fn as_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

impl Display for SceneNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

/// Tag carried by the stage node.
pub const STAGE_ID: &str = "stage";

/// SceneGraph owns every node drawn on the stage.
pub struct SceneGraph {
    /// The stage node; parent of all layers
    root: SceneNodeId,

    /// Storage for all scene nodes, indexed by their IDs
    nodes: SlotMap<SceneNodeId, SceneNode>,

    /// Mutations applied since the last drain
    changes: Vec<SceneChange>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Creates a new scene graph holding only the stage node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::from_spec(
            NodeSpec::new(NodeKind::Stage, STAGE_ID),
            None,
        ));

        Self {
            root,
            nodes,
            changes: Vec::new(),
        }
    }

    /// Returns the ID of the stage node
    pub fn root(&self) -> SceneNodeId {
        self.root
    }

    /// Number of live nodes, the stage included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn contains(&self, node_id: SceneNodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Creates a new node as the last child of `parent_id` (the stage when `None`).
    ///
    /// Does not check whether the parent already has a child with the same
    /// tag; if it does, the index is repointed at the new node and the old one
    /// can only be reached through [`SceneGraph::children`].
    pub fn create_node(&mut self, parent_id: Option<SceneNodeId>, spec: NodeSpec) -> SceneNodeId {
        let parent_id = parent_id.unwrap_or(self.root);
        let id = spec.id.clone();
        let kind = spec.kind;

        let node_id = self.nodes.insert(SceneNode::from_spec(spec, Some(parent_id)));

        match self.nodes.get_mut(parent_id) {
            Some(parent) => {
                parent.children.push(node_id);
                if let Some(shadowed) = parent.child_index.insert(id.clone(), node_id) {
                    log::warn!("node {id} shadows existing sibling {shadowed}");
                }
            }
            None => {
                log::warn!("created node {id} under missing parent {parent_id}");
                if let Some(node) = self.nodes.get_mut(node_id) {
                    node.parent = None;
                }
            }
        }

        log::trace!("created {kind} {id}");
        self.changes.push(SceneChange::Created { id, kind });
        node_id
    }

    /// Removes a node and all its descendants, releasing their handlers.
    ///
    /// Returns the removed node's tag. The stage cannot be removed.
    pub fn remove_node(&mut self, node_id: SceneNodeId) -> Option<String> {
        if node_id == self.root {
            return None;
        }

        let node = self.nodes.get(node_id)?;
        let parent_id = node.parent;
        let children = node.children.clone();

        for child_id in children {
            self.remove_node(child_id);
        }

        let node = self.nodes.remove(node_id)?;

        if let Some(parent) = parent_id.and_then(|id| self.nodes.get_mut(id)) {
            parent.children.retain(|&id| id != node_id);
            if parent.child_index.get(&node.id) == Some(&node_id) {
                parent.child_index.remove(&node.id);
            }
        }

        log::trace!("destroyed {} {}", node.kind, node.id);
        self.changes.push(SceneChange::Destroyed {
            id: node.id.clone(),
            kind: node.kind,
        });
        Some(node.id)
    }

    /// Clears all nodes from the scene graph except the stage
    pub fn clear(&mut self) {
        let layers = self.children(self.root).to_vec();
        for layer in layers {
            self.remove_node(layer);
        }
    }

    /// Finds the direct child of `parent_id` tagged `id`.
    pub fn find_child(&self, parent_id: SceneNodeId, id: &str) -> Option<SceneNodeId> {
        self.nodes.get(parent_id)?.child_index.get(id).copied()
    }

    /// Finds the first direct child of `parent_id` with the given name.
    pub fn find_child_by_name(&self, parent_id: SceneNodeId, name: &str) -> Option<SceneNodeId> {
        self.children(parent_id)
            .iter()
            .copied()
            .find(|&child| self.nodes.get(child).and_then(SceneNode::name) == Some(name))
    }

    /// Gets the children of a scene node, in paint order
    pub fn children(&self, node_id: SceneNodeId) -> &[SceneNodeId] {
        self.nodes
            .get(node_id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Moves a node to `index` among its siblings. Indices past the end move
    /// it to the top.
    pub fn move_to_index(&mut self, node_id: SceneNodeId, index: usize) -> bool {
        let Some(node) = self.nodes.get(node_id) else {
            return false;
        };
        let id = node.id.clone();
        let parent_id = node.parent;
        let Some(parent) = parent_id.and_then(|parent_id| self.nodes.get_mut(parent_id)) else {
            return false;
        };
        let Some(current) = parent.children.iter().position(|&child| child == node_id) else {
            return false;
        };

        parent.children.remove(current);
        let index = index.min(parent.children.len());
        parent.children.insert(index, node_id);

        log::trace!("moved {id} from {current} to {index}");
        self.changes.push(SceneChange::Reordered { id, index });
        true
    }

    /// Get a reference to a node by its ID
    pub fn get_node(&self, node_id: SceneNodeId) -> Option<&SceneNode> {
        self.nodes.get(node_id)
    }

    fn write(&mut self, node_id: SceneNodeId, apply: impl FnOnce(&mut SceneNode) -> Option<SceneChange>) -> bool {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return false;
        };
        match apply(node) {
            Some(change) => {
                self.changes.push(change);
                true
            }
            None => false,
        }
    }

    /// Sets a node's offset relative to its parent
    pub fn set_position(&mut self, node_id: SceneNodeId, position: Vec2) -> bool {
        self.write(node_id, |node| {
            node.position = position;
            Some(SceneChange::Position {
                id: node.id.clone(),
                position,
            })
        })
    }

    /// Sets whether a node receives pointer events
    pub fn set_listening(&mut self, node_id: SceneNodeId, listening: bool) -> bool {
        self.write(node_id, |node| {
            node.listening = listening;
            Some(SceneChange::Listening {
                id: node.id.clone(),
                listening,
            })
        })
    }

    /// Sets the visibility of a node
    pub fn set_visible(&mut self, node_id: SceneNodeId, visible: bool) -> bool {
        self.write(node_id, |node| {
            node.visible = visible;
            Some(SceneChange::Visible {
                id: node.id.clone(),
                visible,
            })
        })
    }

    pub fn set_opacity(&mut self, node_id: SceneNodeId, opacity: f32) -> bool {
        self.write(node_id, |node| {
            node.opacity = opacity;
            Some(SceneChange::Opacity {
                id: node.id.clone(),
                opacity,
            })
        })
    }

    /// Replaces a line's points. Returns false if the node is not a line.
    pub fn set_points(&mut self, node_id: SceneNodeId, points: Vec<f32>) -> bool {
        self.write(node_id, |node| match &mut node.content {
            NodeContent::Line(line) => {
                let count = points.len();
                line.points = points;
                Some(SceneChange::Points {
                    id: node.id.clone(),
                    count,
                })
            }
            _ => None,
        })
    }

    /// Replaces a rect's geometry and fill. Returns false if the node is not a rect.
    pub fn set_rect(&mut self, node_id: SceneNodeId, attrs: RectAttrs) -> bool {
        self.write(node_id, |node| match &mut node.content {
            NodeContent::Rect(rect) => {
                *rect = attrs;
                Some(SceneChange::Rect {
                    id: node.id.clone(),
                })
            }
            _ => None,
        })
    }

    /// Installs the handler fired when a drag on this node ends
    pub fn set_drag_end_handler(&mut self, node_id: SceneNodeId, handler: DragEndHandler) -> bool {
        match self.nodes.get_mut(node_id) {
            Some(node) => {
                node.on_drag_end = Some(handler);
                true
            }
            None => false,
        }
    }

    /// Finishes a drag: moves the node to `position` and fires its drag-end
    /// handler once. Returns false if the node does not exist.
    pub fn end_drag(&mut self, node_id: SceneNodeId, position: Vec2) -> bool {
        if !self.set_position(node_id, position) {
            return false;
        }

        let handler = self
            .nodes
            .get_mut(node_id)
            .and_then(|node| node.on_drag_end.take());

        if let Some(mut handler) = handler {
            handler(position);
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.on_drag_end.get_or_insert(handler);
            }
        }
        true
    }

    /// Calculate the position of a node on the stage by summing offsets up
    /// the parent chain
    pub fn world_position(&self, node_id: SceneNodeId) -> Vec2 {
        let mut position = Vec2::ZERO;
        let mut current = Some(node_id);
        while let Some(id) = current {
            match self.nodes.get(id) {
                Some(node) => {
                    position += node.position;
                    current = node.parent;
                }
                None => break,
            }
        }
        position
    }

    /// Mutations recorded since the last drain, oldest first
    pub fn changes(&self) -> &[SceneChange] {
        &self.changes
    }

    /// Takes the recorded mutations, leaving the journal empty
    pub fn drain_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.changes)
    }

    /// Snapshot of the subtree rooted at `node_id`
    pub fn dump(&self, node_id: SceneNodeId) -> Option<NodeDump> {
        let node = self.nodes.get(node_id)?;
        Some(NodeDump {
            id: node.id.clone(),
            kind: node.kind,
            name: node.name.clone(),
            position: node.position,
            visible: node.visible,
            listening: node.listening,
            opacity: node.opacity,
            draggable: node.draggable,
            content: node.content.clone(),
            children: node
                .children
                .iter()
                .filter_map(|&child| self.dump(child))
                .collect(),
        })
    }
}

/// Serializable snapshot of a node and its descendants.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub position: Vec2,
    pub visible: bool,
    pub listening: bool,
    pub opacity: f32,
    pub draggable: bool,
    pub content: NodeContent,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDump>,
}
