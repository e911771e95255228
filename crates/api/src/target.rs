//! Target specification for commands.
//!
//! Commands need to specify which entity they operate on: either whatever is
//! currently selected or a specific layer.

use layer_state::LayerId;
use serde::{Deserialize, Serialize};

/// Specifies which entity a command targets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The current selection (most common for user actions).
    #[default]
    Selection,

    /// Specific layer by ID.
    Layer(LayerId),
}

impl From<LayerId> for Target {
    fn from(id: LayerId) -> Self {
        Self::Layer(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_serializes_as_tagged_value() {
        let json = serde_json::to_value(Target::Layer("L1".into())).unwrap();
        assert_eq!(json, serde_json::json!({"layer": "L1"}));

        let selection: Target = serde_json::from_str("\"selection\"").unwrap();
        assert_eq!(selection, Target::Selection);
    }
}
