use glam::Vec2;
use layer_state::{BrushLine, EraserLine, LayerId, LayerObject, RasterLayer, RectShape, Tool};
use palette::Srgba;
use renderer::naming::RASTER_LAYER_OBJECT_GROUP_NAME;
use renderer::{render_raster_layer, LayerPosCallback};
use scene_graph::{SceneChange, SceneGraph, SceneNodeId};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use strum::IntoEnumIterator;

fn brush(id: &str, points: &[f32]) -> LayerObject {
    LayerObject::BrushLine(BrushLine {
        id: id.into(),
        points: points.to_vec(),
        stroke_width: 4.0,
        color: Srgba::new(20, 40, 60, 255),
    })
}

fn eraser(id: &str, points: &[f32]) -> LayerObject {
    LayerObject::EraserLine(EraserLine {
        id: id.into(),
        points: points.to_vec(),
        stroke_width: 10.0,
    })
}

fn rect(id: &str, x: f32, width: f32) -> LayerObject {
    LayerObject::RectShape(RectShape {
        id: id.into(),
        x,
        y: 0.0,
        width,
        height: 8.0,
        color: Srgba::new(255, 0, 0, 255),
    })
}

fn layer(objects: Vec<LayerObject>) -> RasterLayer {
    RasterLayer {
        objects,
        ..RasterLayer::new("L1")
    }
}

fn object_group(scene: &SceneGraph, container: SceneNodeId) -> SceneNodeId {
    scene
        .find_child_by_name(container, RASTER_LAYER_OBJECT_GROUP_NAME)
        .expect("object group")
}

fn object_ids(scene: &SceneGraph, container: SceneNodeId) -> BTreeSet<String> {
    let group = object_group(scene, container);
    scene
        .children(group)
        .iter()
        .map(|&child| scene.get_node(child).unwrap().id().to_string())
        .collect()
}

fn node_for(scene: &SceneGraph, container: SceneNodeId, id: &str) -> SceneNodeId {
    scene
        .find_child(object_group(scene, container), id)
        .unwrap_or_else(|| panic!("no node {id}"))
}

#[test]
fn first_render_builds_container_group_and_objects() {
    let mut scene = SceneGraph::new();
    let description = RasterLayer {
        x: 10.7,
        y: 5.2,
        is_enabled: true,
        opacity: 0.8,
        ..layer(vec![brush("s1", &[0.0, 0.0, 10.0, 10.0])])
    };

    let container = render_raster_layer(&mut scene, &description, Tool::Brush, None).unwrap();

    let node = scene.get_node(container).unwrap();
    assert_eq!(node.id(), "L1");
    assert_eq!(node.position(), Vec2::new(10.0, 5.0));
    assert!(node.is_draggable());
    assert_eq!(node.children().len(), 1);

    let group = object_group(&scene, container);
    let group_node = scene.get_node(group).unwrap();
    assert!(!group_node.is_listening());
    assert_eq!(group_node.opacity(), 0.8);
    assert!(group_node.id().starts_with("L1_group_"));

    let stroke = scene.get_node(node_for(&scene, container, "s1")).unwrap();
    assert_eq!(stroke.points(), Some(&[0.0, 0.0, 10.0, 10.0][..]));
}

#[test]
fn rendering_twice_is_idempotent() {
    let mut scene = SceneGraph::new();
    let description = layer(vec![
        brush("s1", &[0.0, 0.0, 1.0, 1.0]),
        eraser("e1", &[2.0, 2.0]),
        rect("r1", 3.0, 4.0),
    ]);

    render_raster_layer(&mut scene, &description, Tool::Brush, None).unwrap();
    let once = scene.dump(scene.root()).unwrap();
    scene.drain_changes();

    render_raster_layer(&mut scene, &description, Tool::Brush, None).unwrap();
    let twice = scene.dump(scene.root()).unwrap();

    assert_eq!(once, twice);
    assert!(scene.changes().iter().all(|change| !change.is_structural()));
    assert!(!scene
        .changes()
        .iter()
        .any(|change| matches!(change, SceneChange::Points { .. } | SceneChange::Rect { .. })));
}

#[test]
fn scene_mirrors_each_description_exactly() {
    let mut scene = SceneGraph::new();
    let passes = [
        vec![brush("a", &[0.0, 0.0]), brush("b", &[1.0, 1.0])],
        vec![brush("b", &[1.0, 1.0]), rect("c", 0.0, 1.0), eraser("d", &[])],
        vec![],
        vec![eraser("d", &[5.0, 5.0]), brush("a", &[0.0, 0.0])],
    ];

    for objects in passes {
        let description = layer(objects);
        let container = render_raster_layer(&mut scene, &description, Tool::Brush, None).unwrap();

        let expected: BTreeSet<String> = description.object_ids().map(|id| id.to_string()).collect();
        assert_eq!(object_ids(&scene, container), expected);
    }
}

#[test]
fn unchanged_point_count_keeps_node() {
    let mut scene = SceneGraph::new();
    let container =
        render_raster_layer(&mut scene, &layer(vec![brush("s1", &[0.0, 0.0, 1.0, 1.0])]), Tool::Brush, None)
            .unwrap();
    let before = node_for(&scene, container, "s1");
    scene.drain_changes();

    // Same count with new values goes unnoticed.
    render_raster_layer(&mut scene, &layer(vec![brush("s1", &[9.0, 9.0, 9.0, 9.0])]), Tool::Brush, None)
        .unwrap();

    let after = node_for(&scene, container, "s1");
    assert_eq!(before, after);
    assert_eq!(scene.get_node(after).unwrap().points(), Some(&[0.0, 0.0, 1.0, 1.0][..]));
    assert!(!scene.changes().iter().any(|change| change.id() == "s1"));
}

#[test]
fn growing_stroke_updates_points_in_place() {
    let mut scene = SceneGraph::new();
    let container =
        render_raster_layer(&mut scene, &layer(vec![eraser("e1", &[0.0, 0.0])]), Tool::Eraser, None).unwrap();
    let before = node_for(&scene, container, "e1");
    scene.drain_changes();

    let grown = [0.0, 0.0, 3.0, 4.0, 5.0, 6.0];
    render_raster_layer(&mut scene, &layer(vec![eraser("e1", &grown)]), Tool::Eraser, None).unwrap();

    let after = node_for(&scene, container, "e1");
    assert_eq!(before, after);
    assert_eq!(scene.get_node(after).unwrap().points(), Some(&grown[..]));
    let touching: Vec<_> = scene.changes().iter().filter(|c| c.id() == "e1").collect();
    assert_eq!(
        touching,
        vec![&SceneChange::Points {
            id: "e1".into(),
            count: 6
        }]
    );
}

#[test]
fn removed_objects_are_destroyed() {
    let mut scene = SceneGraph::new();
    let container = render_raster_layer(
        &mut scene,
        &layer(vec![brush("X", &[0.0, 0.0]), brush("Y", &[1.0, 1.0])]),
        Tool::Brush,
        None,
    )
    .unwrap();
    let x = node_for(&scene, container, "X");

    render_raster_layer(&mut scene, &layer(vec![brush("Y", &[1.0, 1.0])]), Tool::Brush, None).unwrap();

    assert!(!scene.contains(x));
    assert_eq!(scene.find_child(object_group(&scene, container), "X"), None);
    assert_eq!(object_ids(&scene, container), BTreeSet::from(["Y".to_string()]));
}

#[test]
fn container_listens_only_under_move_tool() {
    let mut scene = SceneGraph::new();
    let description = layer(vec![]);

    for tool in Tool::iter() {
        let container = render_raster_layer(&mut scene, &description, tool, None).unwrap();
        assert_eq!(
            scene.get_node(container).unwrap().is_listening(),
            tool == Tool::Move,
            "tool {tool}"
        );
    }
}

#[test]
fn visibility_is_written_only_when_it_changes() {
    let visibility_writes = |scene: &SceneGraph| {
        scene
            .changes()
            .iter()
            .filter(|change| matches!(change, SceneChange::Visible { .. }))
            .count()
    };

    let mut scene = SceneGraph::new();
    let enabled = layer(vec![]);
    let container = render_raster_layer(&mut scene, &enabled, Tool::Brush, None).unwrap();
    assert_eq!(visibility_writes(&scene), 0);

    scene.drain_changes();
    render_raster_layer(&mut scene, &enabled, Tool::Brush, None).unwrap();
    assert_eq!(visibility_writes(&scene), 0);

    scene.drain_changes();
    let disabled = RasterLayer {
        is_enabled: false,
        ..enabled.clone()
    };
    render_raster_layer(&mut scene, &disabled, Tool::Brush, None).unwrap();
    assert_eq!(visibility_writes(&scene), 1);
    assert!(!scene.get_node(container).unwrap().is_visible());
}

#[test]
fn position_and_listening_are_written_every_pass() {
    let mut scene = SceneGraph::new();
    let description = layer(vec![]);
    render_raster_layer(&mut scene, &description, Tool::Brush, None).unwrap();
    scene.drain_changes();

    render_raster_layer(&mut scene, &description, Tool::Brush, None).unwrap();

    let writes: Vec<_> = scene.changes().iter().filter(|c| c.id() == "L1").collect();
    assert!(writes.iter().any(|c| matches!(c, SceneChange::Position { .. })));
    assert!(writes.iter().any(|c| matches!(c, SceneChange::Listening { .. })));
}

#[test]
fn rects_are_updated_in_place() {
    let mut scene = SceneGraph::new();
    let container = render_raster_layer(&mut scene, &layer(vec![rect("r1", 0.0, 4.0)]), Tool::Rect, None).unwrap();
    let before = node_for(&scene, container, "r1");
    scene.drain_changes();

    render_raster_layer(&mut scene, &layer(vec![rect("r1", 2.0, 6.0)]), Tool::Rect, None).unwrap();

    let after = node_for(&scene, container, "r1");
    assert_eq!(before, after);
    let attrs = scene.get_node(after).unwrap().rect().unwrap();
    assert_eq!(attrs.position, Vec2::new(2.0, 0.0));
    assert_eq!(attrs.size, Vec2::new(6.0, 8.0));
    assert!(!scene.changes().iter().any(SceneChange::is_structural));
}

#[test]
fn opacity_is_clamped_onto_group() {
    let mut scene = SceneGraph::new();
    let description = RasterLayer {
        opacity: 3.0,
        ..layer(vec![])
    };

    let container = render_raster_layer(&mut scene, &description, Tool::Brush, None).unwrap();

    let group = object_group(&scene, container);
    assert_eq!(scene.get_node(group).unwrap().opacity(), 1.0);
}

#[test]
fn drag_end_reports_floored_position() {
    let reports: Rc<RefCell<Vec<(LayerId, i32, i32)>>> = Rc::default();
    let sink = Rc::clone(&reports);
    let callback: LayerPosCallback = Rc::new(move |id: &LayerId, x: i32, y: i32| sink.borrow_mut().push((id.clone(), x, y)));

    let mut scene = SceneGraph::new();
    let container = render_raster_layer(&mut scene, &layer(vec![]), Tool::Move, Some(&callback)).unwrap();

    scene.end_drag(container, Vec2::new(12.9, -3.2));

    assert_eq!(*reports.borrow(), vec![(LayerId::from("L1"), 12, -4)]);
}

#[test]
fn drag_callback_is_attached_only_on_creation() {
    let mut scene = SceneGraph::new();
    let container = render_raster_layer(&mut scene, &layer(vec![]), Tool::Move, None).unwrap();

    let callback: LayerPosCallback = Rc::new(|_: &LayerId, _: i32, _: i32| {});
    render_raster_layer(&mut scene, &layer(vec![]), Tool::Move, Some(&callback)).unwrap();

    assert!(!scene.get_node(container).unwrap().has_drag_end_handler());
}

#[test]
fn paint_order_follows_creation_order() {
    let mut scene = SceneGraph::new();
    let container = render_raster_layer(
        &mut scene,
        &layer(vec![brush("a", &[]), rect("b", 0.0, 1.0), eraser("c", &[])]),
        Tool::Brush,
        None,
    )
    .unwrap();

    let group = object_group(&scene, container);
    let order: Vec<_> = scene
        .children(group)
        .iter()
        .map(|&child| scene.get_node(child).unwrap().id().to_string())
        .collect();
    assert_eq!(order, vec!["a", "b", "c"]);
}

#[test]
fn layers_deserialized_from_json_render() {
    let description: RasterLayer = serde_json::from_str(
        r#"{"id": "L9", "x": 1.5, "y": 2.5, "opacity": 0.25,
            "objects": [{"type": "brush_line", "id": "s1", "points": [0, 0, 1, 1]}]}"#,
    )
    .unwrap();

    let mut scene = SceneGraph::new();
    let container = render_raster_layer(&mut scene, &description, Tool::Brush, None).unwrap();

    assert_eq!(scene.get_node(container).unwrap().position(), Vec2::new(1.0, 2.0));
    assert_eq!(object_ids(&scene, container), BTreeSet::from(["s1".to_string()]));
}
