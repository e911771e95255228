//! Raster CLI - render canvas documents onto a scene graph and run canvas
//! actions from the command line.
//!
//! A document is a JSON [`CanvasState`]: stage config, active tool, selection
//! and raster layers.

mod logger;

use anyhow::{Context, Result};
use api::{execute_command, execute_query, ActionRegistry, CanvasState, Command, Query};
use clap::{Parser, Subcommand};
use glam::Vec2;
use layer_state::{LayerId, Tool};
use logger::{level_for_verbosity, CliLogger};
use renderer::{layer_drag_bound, render_raster_layers, LayerPosCallback};
use scene_graph::SceneGraph;
use serde::Serialize;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Raster CLI - reconcile raster layer documents and run canvas actions
#[derive(Parser)]
#[command(name = "raster-cli")]
#[command(about = "Render raster layer documents and run canvas actions")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Also append log lines to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every layer and print the resulting scene tree
    Render {
        /// Canvas document (JSON)
        document: PathBuf,

        /// Override the document's active tool
        #[arg(long)]
        tool: Option<Tool>,

        /// Number of render passes to run
        #[arg(long, default_value_t = 1)]
        passes: usize,

        /// Print the mutations of the last pass instead of the tree
        #[arg(long)]
        changes: bool,
    },

    /// Duplicate the selected layer and print the updated document
    Duplicate {
        /// Canvas document (JSON)
        document: PathBuf,

        /// Select this layer before duplicating
        #[arg(long)]
        select: Option<String>,
    },

    /// Drag a layer to a new position and print the updated document
    Drag {
        /// Canvas document (JSON)
        document: PathBuf,

        /// Layer to drag
        layer: String,

        /// Target x in canvas units
        #[arg(allow_negative_numbers = true)]
        x: f32,

        /// Target y in canvas units
        #[arg(allow_negative_numbers = true)]
        y: f32,
    },

    /// List registered actions and whether each is enabled
    Actions {
        /// Canvas document (JSON)
        document: PathBuf,
    },

    /// Apply a JSON command and print the result and updated document
    Command {
        /// Canvas document (JSON)
        document: PathBuf,

        /// JSON command to execute
        json: String,
    },

    /// Run a JSON query against the document
    Query {
        /// Canvas document (JSON)
        document: PathBuf,

        /// JSON query to execute
        json: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::init(level_for_verbosity(cli.verbose), cli.log_file.as_deref())?;

    match cli.command {
        Commands::Render {
            document,
            tool,
            passes,
            changes,
        } => render(&document, tool, passes, changes),
        Commands::Duplicate { document, select } => duplicate(&document, select),
        Commands::Drag { document, layer, x, y } => drag(&document, layer.into(), Vec2::new(x, y)),
        Commands::Actions { document } => list_actions(&document),
        Commands::Command { document, json } => run_command(&document, &json),
        Commands::Query { document, json } => run_query(&document, &json),
    }
}

fn load_document(path: &Path) -> Result<CanvasState> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    let state = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid canvas document: {}", path.display()))?;
    log::info!("loaded {}", path.display());
    Ok(state)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render the document's layers `passes` times onto a fresh stage.
fn render(path: &Path, tool: Option<Tool>, passes: usize, changes: bool) -> Result<()> {
    let state = load_document(path)?;
    let tool = tool.unwrap_or(state.tool);
    let mut scene = SceneGraph::new();

    for pass in 1..=passes.max(1) {
        scene.drain_changes();
        render_raster_layers(&mut scene, &state.layers, tool, None)
            .with_context(|| format!("Render pass {pass} failed"))?;
        log::info!("pass {pass}: {} mutations", scene.changes().len());
    }

    if changes {
        print_json(&scene.changes())
    } else {
        let tree = scene
            .dump(scene.root())
            .context("Stage node missing from scene graph")?;
        print_json(&tree)
    }
}

fn duplicate(path: &Path, select: Option<String>) -> Result<()> {
    let mut state = load_document(path)?;
    if let Some(id) = select {
        state.selected = Some(id.into());
    }

    let registry = ActionRegistry::with_defaults();
    let result = registry.dispatch(api::DUPLICATE_ENTITY, &mut state)?;
    log::info!("duplicate: {result:?}");
    print_json(&state)
}

fn drag(path: &Path, layer: LayerId, target: Vec2) -> Result<()> {
    let mut state = load_document(path)?;
    apply_drag(&mut state, &layer, target)?;
    print_json(&state)
}

/// Render, then drag `layer` to `target` the way a pointer would: the drag is
/// bounded to the stage, and the drag-end callback writes the new position
/// back into the document.
fn apply_drag(state: &mut CanvasState, layer: &LayerId, target: Vec2) -> Result<()> {
    let mut scene = SceneGraph::new();

    let pending: Rc<RefCell<Vec<Command>>> = Rc::default();
    let queue = Rc::clone(&pending);
    let on_layer_pos_changed: LayerPosCallback = Rc::new(move |id: &LayerId, x: i32, y: i32| {
        queue.borrow_mut().push(Command::SetLayerPosition {
            id: id.clone(),
            x: x as f32,
            y: y as f32,
        });
    });

    render_raster_layers(&mut scene, &state.layers, Tool::Move, Some(&on_layer_pos_changed))?;

    let node = scene
        .find_child(scene.root(), layer.as_str())
        .with_context(|| format!("Layer not found: {layer}"))?;
    // The pointer sits on the target, in stage pixels.
    let pointer = target * state.stage.scale;
    let bounded = layer_drag_bound(&scene, &state.stage, node, Some(pointer), target);
    scene.end_drag(node, bounded);

    let commands: Vec<Command> = pending.borrow_mut().drain(..).collect();
    for command in commands {
        let result = execute_command(state, command);
        log::info!("drag: {result:?}");
    }
    Ok(())
}

#[derive(Serialize)]
struct ActionStatus {
    name: &'static str,
    label: &'static str,
    enabled: bool,
}

fn list_actions(path: &Path) -> Result<()> {
    let state = load_document(path)?;
    let registry = ActionRegistry::with_defaults();
    let statuses: Vec<_> = registry
        .iter()
        .map(|action| ActionStatus {
            name: action.name,
            label: action.label,
            enabled: action.is_enabled(&state),
        })
        .collect();
    print_json(&statuses)
}

fn run_command(path: &Path, json: &str) -> Result<()> {
    let mut state = load_document(path)?;
    let command: Command = serde_json::from_str(json).with_context(|| "Invalid command JSON")?;

    let result = execute_command(&mut state, command);
    print_json(&result)?;
    print_json(&state)
}

fn run_query(path: &Path, json: &str) -> Result<()> {
    let state = load_document(path)?;
    let query: Query = serde_json::from_str(json).with_context(|| "Invalid query JSON")?;
    print_json(&execute_query(&state, query))
}
