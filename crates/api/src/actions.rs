//! Named application actions.
//!
//! UI surfaces (buttons, menus, shortcuts) refer to actions by name. An action
//! is available only while its precondition holds, and running it builds a
//! [`Command`] from the current state and executes it.

use crate::{execute_command, CanvasState, Command, CommandResult, Target};

/// Name of the action that duplicates the selected entity.
pub const DUPLICATE_ENTITY: &str = "entity.duplicate";

/// A named, precondition-gated action.
#[derive(Clone, Copy, Debug)]
pub struct Action {
    pub name: &'static str,
    /// Human-readable label (also used as the accessible name).
    pub label: &'static str,
    enabled: fn(&CanvasState) -> bool,
    build: fn(&CanvasState) -> Command,
}

impl Action {
    pub fn new(
        name: &'static str,
        label: &'static str,
        enabled: fn(&CanvasState) -> bool,
        build: fn(&CanvasState) -> Command,
    ) -> Self {
        Self {
            name,
            label,
            enabled,
            build,
        }
    }

    pub fn is_enabled(&self, state: &CanvasState) -> bool {
        (self.enabled)(state)
    }
}

fn has_selection(state: &CanvasState) -> bool {
    state.selected_layer().is_some()
}

fn duplicate_selection(_: &CanvasState) -> Command {
    Command::DuplicateEntity {
        target: Target::Selection,
    }
}

/// Error type for action dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// No action is registered under this name.
    Unknown(String),
    /// The action exists but its precondition does not hold.
    Disabled(&'static str),
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(name) => write!(f, "Unknown action: {}", name),
            Self::Disabled(name) => write!(f, "Action is disabled: {}", name),
        }
    }
}

impl std::error::Error for ActionError {}

/// Directory of the actions the application exposes, in registration order.
#[derive(Clone, Debug, Default)]
pub struct ActionRegistry {
    actions: Vec<Action>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in canvas actions.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Action::new(
            DUPLICATE_ENTITY,
            "Duplicate",
            has_selection,
            duplicate_selection,
        ));
        registry
    }

    /// Registers an action, replacing any action with the same name.
    pub fn register(&mut self, action: Action) {
        match self.actions.iter_mut().find(|existing| existing.name == action.name) {
            Some(existing) => *existing = action,
            None => self.actions.push(action),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Whether `name` is registered and currently enabled.
    pub fn is_enabled(&self, name: &str, state: &CanvasState) -> bool {
        self.get(name).is_some_and(|action| action.is_enabled(state))
    }

    /// Runs the named action against `state`.
    pub fn dispatch(&self, name: &str, state: &mut CanvasState) -> Result<CommandResult, ActionError> {
        let action = self
            .get(name)
            .ok_or_else(|| ActionError::Unknown(name.to_string()))?;
        if !action.is_enabled(state) {
            log::debug!("action {name} skipped: precondition not met");
            return Err(ActionError::Disabled(action.name));
        }
        let command = (action.build)(state);
        Ok(execute_command(state, command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layer_state::RasterLayer;

    #[test]
    fn duplicate_is_disabled_without_selection() {
        let registry = ActionRegistry::with_defaults();
        let mut state = CanvasState::new(vec![RasterLayer::new("L1")]);

        assert!(!registry.is_enabled(DUPLICATE_ENTITY, &state));
        assert_eq!(
            registry.dispatch(DUPLICATE_ENTITY, &mut state),
            Err(ActionError::Disabled(DUPLICATE_ENTITY))
        );
        assert_eq!(state.layers.len(), 1);
    }

    #[test]
    fn duplicate_runs_when_something_is_selected() {
        let registry = ActionRegistry::with_defaults();
        let mut state = CanvasState::new(vec![RasterLayer::new("L1")]);
        state.selected = Some("L1".into());

        assert!(registry.is_enabled(DUPLICATE_ENTITY, &state));
        let result = registry.dispatch(DUPLICATE_ENTITY, &mut state).unwrap();

        assert!(result.is_success());
        assert_eq!(state.layers.len(), 2);
        assert_ne!(state.selected, Some("L1".into()));
    }

    #[test]
    fn stale_selection_counts_as_no_selection() {
        let registry = ActionRegistry::with_defaults();
        let mut state = CanvasState::new(vec![RasterLayer::new("L1")]);
        state.selected = Some("deleted".into());

        assert!(!registry.is_enabled(DUPLICATE_ENTITY, &state));
    }

    #[test]
    fn unknown_actions_are_reported() {
        let registry = ActionRegistry::with_defaults();
        let mut state = CanvasState::default();

        assert_eq!(
            registry.dispatch("entity.explode", &mut state),
            Err(ActionError::Unknown("entity.explode".into()))
        );
        assert_eq!(
            registry.dispatch("entity.explode", &mut state).unwrap_err().to_string(),
            "Unknown action: entity.explode"
        );
    }

    #[test]
    fn registering_same_name_replaces() {
        let mut registry = ActionRegistry::with_defaults();
        registry.register(Action::new(DUPLICATE_ENTITY, "Copy", |_| true, duplicate_selection));

        assert_eq!(registry.iter().count(), 1);
        assert_eq!(registry.get(DUPLICATE_ENTITY).unwrap().label, "Copy");
    }
}
