//! Logic for creating and rendering raster layers.
//!
//! A raster layer renders as a draggable layer container on the stage holding
//! one non-listening object group, and the group holds one node per drawable
//! object. [`render_raster_layer`] brings that subtree into agreement with a
//! [`RasterLayer`] description and can be called every render cycle.

use crate::naming::{object_group_id, RASTER_LAYER_NAME, RASTER_LAYER_OBJECT_GROUP_NAME};
use crate::objects::{create_object, rect_attrs};
use crate::RenderError;
use glam::Vec2;
use layer_state::{LayerId, LayerObject, ObjectId, RasterLayer, Tool};
use scene_graph::{NodeKind, NodeSpec, SceneGraph, SceneNode, SceneNodeId};
use std::collections::HashSet;
use std::rc::Rc;

/// Receives a layer's new whole-pixel position when the user finishes
/// dragging it.
pub type LayerPosCallback = Rc<dyn Fn(&LayerId, i32, i32)>;

/// Creates the container and object group for a layer that has no nodes yet.
fn create_raster_layer(
    scene: &mut SceneGraph,
    layer: &RasterLayer,
    on_layer_pos_changed: Option<&LayerPosCallback>,
) -> SceneNodeId {
    let container = scene.create_node(
        None,
        NodeSpec::layer(layer.id.as_str())
            .name(RASTER_LAYER_NAME)
            .draggable(true)
            .drag_distance(0.0),
    );

    // Position is reported once the drag finishes; during the drag the scene
    // graph moves the container itself.
    if let Some(callback) = on_layer_pos_changed {
        let callback = Rc::clone(callback);
        let layer_id = layer.id.clone();
        scene.set_drag_end_handler(
            container,
            Box::new(move |position: Vec2| {
                let position = position.floor();
                callback(&layer_id, position.x as i32, position.y as i32);
            }),
        );
    }

    scene.create_node(
        Some(container),
        NodeSpec::group(object_group_id(&layer.id, uuid::Uuid::new_v4()))
            .name(RASTER_LAYER_OBJECT_GROUP_NAME)
            .listening(false),
    );

    log::debug!("created raster layer {}", layer.id);
    container
}

fn node_kind_for(object: &LayerObject) -> NodeKind {
    match object {
        LayerObject::BrushLine(_) | LayerObject::EraserLine(_) => NodeKind::Line,
        LayerObject::RectShape(_) => NodeKind::Rect,
    }
}

/// Creates the node for `object` if it is missing, otherwise updates the
/// existing node in place.
fn sync_object(scene: &mut SceneGraph, group: SceneNodeId, object: &LayerObject) {
    let existing = scene
        .find_child(group, object.id().as_str())
        .filter(|&node| scene.get_node(node).map(SceneNode::kind) == Some(node_kind_for(object)));

    let Some(node) = existing else {
        // An id that changed variant cannot be updated in place. The rebuilt
        // node takes the old one's slot in paint order.
        let slot = scene.find_child(group, object.id().as_str()).and_then(|mismatched| {
            log::debug!("object {} changed kind, rebuilding", object.id());
            let slot = scene.children(group).iter().position(|&child| child == mismatched);
            scene.remove_node(mismatched);
            slot
        });
        let node = create_object(object, scene, group);
        if let Some(slot) = slot {
            scene.move_to_index(node, slot);
        }
        return;
    };

    match object {
        LayerObject::BrushLine(layer_state::BrushLine { points, .. })
        | LayerObject::EraserLine(layer_state::EraserLine { points, .. }) => {
            // Strokes only grow or get replaced wholesale, so comparing the
            // point count is enough to spot a change.
            let current = scene
                .get_node(node)
                .and_then(SceneNode::points)
                .map(<[f32]>::len);
            if current != Some(points.len()) {
                scene.set_points(node, points.clone());
            }
        }
        LayerObject::RectShape(rect) => {
            let attrs = rect_attrs(rect);
            if scene.get_node(node).and_then(SceneNode::rect) != Some(&attrs) {
                scene.set_rect(node, attrs);
            }
        }
    }
}

/// Renders a raster layer onto the stage.
///
/// Looks up the layer's container by id, creating it on first use, then:
/// positions it at the floored layer offset and makes it listen only under
/// [`Tool::Move`]; destroys object nodes whose ids are gone from the
/// description; creates or updates a node per object in order; and finally
/// syncs visibility (only when it changed) and group opacity.
///
/// `on_layer_pos_changed` is attached only when the container is created.
///
/// Object ids are checked for duplicates before anything is touched, so a
/// rejected description leaves the scene as it was.
pub fn render_raster_layer(
    scene: &mut SceneGraph,
    layer: &RasterLayer,
    tool: Tool,
    on_layer_pos_changed: Option<&LayerPosCallback>,
) -> Result<SceneNodeId, RenderError> {
    if let Some(object) = layer.duplicate_object_id() {
        return Err(RenderError::DuplicateObjectId {
            layer: layer.id.clone(),
            object: object.clone(),
        });
    }

    let container = match scene.find_child(scene.root(), layer.id.as_str()) {
        Some(container) => container,
        None => create_raster_layer(scene, layer, on_layer_pos_changed),
    };

    scene.set_listening(container, tool.layers_listen());
    scene.set_position(container, layer.floored_position());

    let group = scene
        .find_child_by_name(container, RASTER_LAYER_OBJECT_GROUP_NAME)
        .ok_or_else(|| RenderError::MissingObjectGroup {
            layer: layer.id.clone(),
        })?;

    let live: HashSet<&str> = layer.object_ids().map(ObjectId::as_str).collect();
    let stale: Vec<SceneNodeId> = scene
        .children(group)
        .iter()
        .copied()
        .filter(|&child| {
            scene
                .get_node(child)
                .map_or(false, |node| !live.contains(node.id()))
        })
        .collect();
    for node in stale {
        scene.remove_node(node);
    }

    for object in &layer.objects {
        sync_object(scene, group, object);
    }

    let visible = scene.get_node(container).map(SceneNode::is_visible);
    if visible != Some(layer.is_enabled) {
        scene.set_visible(container, layer.is_enabled);
    }

    scene.set_opacity(group, layer.effective_opacity());

    Ok(container)
}

/// Renders every layer in order and destroys raster layer containers whose
/// layers no longer exist.
///
/// Containers are then stacked in the order of `layers`, within the stage
/// slots raster layers already occupy; other stage children keep their place.
///
/// Stops at the first layer that fails; layers before it stay rendered and
/// are not reordered.
pub fn render_raster_layers(
    scene: &mut SceneGraph,
    layers: &[RasterLayer],
    tool: Tool,
    on_layer_pos_changed: Option<&LayerPosCallback>,
) -> Result<(), RenderError> {
    let live: HashSet<&str> = layers.iter().map(|layer| layer.id.as_str()).collect();
    let stale: Vec<SceneNodeId> = scene
        .children(scene.root())
        .iter()
        .copied()
        .filter(|&child| {
            is_raster_container(scene, child)
                && scene
                    .get_node(child)
                    .map_or(false, |node| !live.contains(node.id()))
        })
        .collect();
    for node in stale {
        if let Some(id) = scene.remove_node(node) {
            log::debug!("destroyed raster layer {id}");
        }
    }

    for layer in layers {
        render_raster_layer(scene, layer, tool, on_layer_pos_changed)?;
    }

    sync_layer_order(scene, layers);
    Ok(())
}

fn is_raster_container(scene: &SceneGraph, node: SceneNodeId) -> bool {
    scene.get_node(node).and_then(SceneNode::name) == Some(RASTER_LAYER_NAME)
}

/// Stacks raster layer containers in document order. Only containers move.
fn sync_layer_order(scene: &mut SceneGraph, layers: &[RasterLayer]) {
    let root = scene.root();
    let containers: Vec<SceneNodeId> = layers
        .iter()
        .filter_map(|layer| scene.find_child(root, layer.id.as_str()))
        .collect();
    let current = scene.children(root).to_vec();

    let slots = current
        .iter()
        .filter(|&&child| is_raster_container(scene, child))
        .count();
    if slots != containers.len() {
        log::warn!(
            "{} raster layer containers for {} layers, leaving stage order alone",
            slots,
            containers.len()
        );
        return;
    }

    let mut in_order = containers.into_iter();
    let target: Vec<SceneNodeId> = current
        .iter()
        .map(|&child| {
            if is_raster_container(scene, child) {
                in_order.next().unwrap_or(child)
            } else {
                child
            }
        })
        .collect();

    for (index, &node) in target.iter().enumerate() {
        if scene.children(root).get(index) != Some(&node) {
            scene.move_to_index(node, index);
        }
    }
}
