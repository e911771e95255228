//! Command and query execution against the canvas store.

use crate::{CanvasState, Command, CommandResult, LayerInfo, Query, QueryResult, Target};
use layer_state::LayerId;

/// Execute a command against the canvas.
pub fn execute_command(state: &mut CanvasState, command: Command) -> CommandResult {
    log::debug!("executing {command:?}");
    match command {
        Command::DuplicateEntity { target } => {
            let Some(id) = resolve_target(state, &target) else {
                return match target {
                    Target::Selection => CommandResult::success(),
                    Target::Layer(id) => CommandResult::error(format!("Layer not found: {id}")),
                };
            };
            let Some(index) = state.index_of(&id) else {
                return CommandResult::error(format!("Layer not found: {id}"));
            };

            let copy = state.layers[index].duplicated();
            let copy_id = copy.id.clone();
            state.layers.insert(index + 1, copy);
            state.selected = Some(copy_id.clone());

            log::info!("duplicated layer {id} as {copy_id}");
            CommandResult::created(vec![copy_id])
        }

        Command::SetEntityEnabled { target, enabled } => {
            let Some(id) = resolve_target(state, &target) else {
                return CommandResult::error("No target layer");
            };
            let Some(layer) = state.layer_mut(&id) else {
                return CommandResult::error(format!("Layer not found: {id}"));
            };
            layer.is_enabled = enabled;
            CommandResult::modified(vec![layer.id.clone()])
        }

        Command::SetLayerPosition { id, x, y } => match state.layer_mut(&id) {
            Some(layer) => {
                layer.x = x;
                layer.y = y;
                CommandResult::modified(vec![id])
            }
            None => CommandResult::error(format!("Layer not found: {id}")),
        },

        Command::SelectEntity { id } => {
            if state.layer(&id).is_none() {
                return CommandResult::error(format!("Layer not found: {id}"));
            }
            state.selected = Some(id);
            CommandResult::success()
        }

        Command::ClearSelection => {
            state.selected = None;
            CommandResult::success()
        }

        Command::SetTool { tool } => {
            state.tool = tool;
            CommandResult::success()
        }

        Command::Batch { commands } => {
            let mut all_created = Vec::new();
            let mut all_modified = Vec::new();

            for cmd in commands {
                match execute_command(state, cmd) {
                    CommandResult::Success { created, modified } => {
                        all_created.extend(created);
                        all_modified.extend(modified);
                    }
                    CommandResult::Error { message } => {
                        return CommandResult::error(format!("Batch failed: {}", message));
                    }
                }
            }

            CommandResult::Success {
                created: all_created,
                modified: all_modified,
            }
        }
    }
}

/// Execute a query against the canvas.
pub fn execute_query(state: &CanvasState, query: Query) -> QueryResult {
    match query {
        Query::GetSelection => QueryResult::Selection {
            id: state.selected_layer().map(|layer| layer.id.clone()),
        },

        Query::GetLayers => QueryResult::Layers {
            layers: state.layers.iter().map(LayerInfo::from).collect(),
        },

        Query::GetLayer { id } => QueryResult::Layer {
            layer: state.layer(&id).map(LayerInfo::from),
        },

        Query::GetTool => QueryResult::Tool { tool: state.tool },

        Query::GetLayerCount => QueryResult::Count {
            count: state.layers.len(),
        },
    }
}

/// Resolve a target to an existing layer ID.
fn resolve_target(state: &CanvasState, target: &Target) -> Option<LayerId> {
    match target {
        Target::Selection => state.selected_layer().map(|layer| layer.id.clone()),
        Target::Layer(id) => state.layer(id).map(|layer| layer.id.clone()),
    }
}
