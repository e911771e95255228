//! Canvas API - command, query and action interface for the raster canvas.
//!
//! This crate defines the typed command language for canvas operations.
//! Commands represent user intent and are:
//! - Serializable (for recording, scripting, the CLI)
//! - Intent-based (what to do, not how to do it)
//!
//! UI surfaces dispatch named actions from an [`ActionRegistry`]; each action
//! is gated by a precondition and resolves to a [`Command`].
//!
//! # Example
//! ```
//! use api::{ActionRegistry, CanvasState, DUPLICATE_ENTITY};
//! use layer_state::RasterLayer;
//!
//! let registry = ActionRegistry::with_defaults();
//! let mut state = CanvasState::new(vec![RasterLayer::new("layer-1")]);
//! state.selected = Some("layer-1".into());
//!
//! let result = registry.dispatch(DUPLICATE_ENTITY, &mut state).unwrap();
//! assert!(result.is_success());
//! assert_eq!(state.layers.len(), 2);
//! ```

mod actions;
mod command;
mod executor;
mod query;
mod state;
mod target;

pub use actions::*;
pub use command::*;
pub use executor::{execute_command, execute_query};
pub use query::*;
pub use state::CanvasState;
pub use target::*;
