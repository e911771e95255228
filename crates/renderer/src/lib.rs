//! Renders declarative raster layer state onto the retained scene graph.
//!
//! Each call to [`render_raster_layer`] reconciles one layer: nodes are looked
//! up by id, created when missing, updated in place when their description
//! changed, and destroyed when their description is gone. Unchanged nodes are
//! left alone.
//!
//! # Example
//! ```
//! use layer_state::{RasterLayer, Tool};
//! use renderer::render_raster_layer;
//! use scene_graph::SceneGraph;
//!
//! let mut scene = SceneGraph::new();
//! let layer = RasterLayer::new("layer-1");
//! let container = render_raster_layer(&mut scene, &layer, Tool::Move, None)?;
//! assert!(scene.get_node(container).unwrap().is_listening());
//! # Ok::<(), renderer::RenderError>(())
//! ```

mod error;
pub mod naming;
pub mod objects;
mod raster_layer;
mod stage;

pub use error::RenderError;
pub use raster_layer::{render_raster_layer, render_raster_layers, LayerPosCallback};
pub use stage::layer_drag_bound;
