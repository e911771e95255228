use glam::Vec2;
use layer_state::StageConfig;
use scene_graph::{SceneGraph, SceneNodeId};

/// Limits where a layer may be dragged.
///
/// The drag is accepted only while the pointer, in canvas units, stays within
/// the stage. Otherwise, or when the pointer position is unknown, the layer
/// stays where it currently is on the stage.
pub fn layer_drag_bound(
    scene: &SceneGraph,
    stage: &StageConfig,
    layer_node: SceneNodeId,
    pointer: Option<Vec2>,
    proposed: Vec2,
) -> Vec2 {
    match pointer.map(|pointer| stage.scaled_floored_cursor(pointer)) {
        Some(cursor) if stage.contains(cursor) => proposed,
        _ => scene.world_position(layer_node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_graph::NodeSpec;

    fn setup() -> (SceneGraph, SceneNodeId, StageConfig) {
        let mut scene = SceneGraph::new();
        let layer = scene.create_node(None, NodeSpec::layer("L1"));
        scene.set_position(layer, Vec2::new(5.0, 6.0));
        let stage = StageConfig {
            width: 200.0,
            height: 100.0,
            scale: Vec2::splat(2.0),
        };
        (scene, layer, stage)
    }

    #[test]
    fn accepts_drag_while_pointer_is_on_stage() {
        let (scene, layer, stage) = setup();
        let proposed = Vec2::new(40.0, 20.0);
        assert_eq!(
            layer_drag_bound(&scene, &stage, layer, Some(Vec2::new(150.0, 90.0)), proposed),
            proposed
        );
    }

    #[test]
    fn holds_position_when_pointer_leaves_stage() {
        let (scene, layer, stage) = setup();
        let proposed = Vec2::new(40.0, 20.0);
        // 220 / 2 = 110, past the 100 unit wide canvas.
        assert_eq!(
            layer_drag_bound(&scene, &stage, layer, Some(Vec2::new(220.0, 10.0)), proposed),
            Vec2::new(5.0, 6.0)
        );
        assert_eq!(
            layer_drag_bound(&scene, &stage, layer, Some(Vec2::new(-3.0, 10.0)), proposed),
            Vec2::new(5.0, 6.0)
        );
    }

    #[test]
    fn holds_position_without_pointer() {
        let (scene, layer, stage) = setup();
        assert_eq!(
            layer_drag_bound(&scene, &stage, layer, None, Vec2::new(1.0, 1.0)),
            Vec2::new(5.0, 6.0)
        );
    }
}
