//! Host node surface
//!
//! Models the plugin contract a node-based pipeline host expects:
//! - A static descriptor (id, label, inputs, outputs)
//! - A registry the host queries for available nodes
//! - Invocation with named inputs, returning named outputs
//!
//! Load messages go through an injected [`registry::LoadNotifier`], never
//! straight to the console.

use serde::{Deserialize, Serialize};

pub mod descriptor;
pub mod registry;

use crate::filter::{self, Prompt};
use descriptor::{INPUT_APPEND, INPUT_REMOVE, INPUT_REPLACE};

pub use descriptor::{NodeDescriptor, TAG_FILTER};
pub use registry::{LogNotifier, NodeRegistry, default_registry};

/// Inputs for one invocation of the tag filter node
///
/// Omitted rule fields fall back to the widget defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeInputs {
    pub text: Prompt,

    #[serde(default = "default_remove")]
    pub tags_to_remove: String,

    #[serde(default = "default_replace")]
    pub tags_to_replace: String,

    #[serde(default = "default_append")]
    pub tags_to_append: String,
}

fn default_remove() -> String {
    TAG_FILTER.default_for(INPUT_REMOVE).to_string()
}

fn default_replace() -> String {
    TAG_FILTER.default_for(INPUT_REPLACE).to_string()
}

fn default_append() -> String {
    TAG_FILTER.default_for(INPUT_APPEND).to_string()
}

/// Outputs of the tag filter node
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodeOutputs {
    pub processed_text: Prompt,
}

/// Run the tag filter node
pub fn invoke(inputs: NodeInputs) -> NodeOutputs {
    log::debug!(
        "Invoking {} with {} prompt(s)",
        TAG_FILTER.id,
        inputs.text.len()
    );

    NodeOutputs {
        processed_text: filter::process(
            inputs.text,
            &inputs.tags_to_remove,
            &inputs.tags_to_replace,
            &inputs.tags_to_append,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::descriptor::DEFAULT_REMOVE;

    #[test]
    fn test_invoke_with_defaults() {
        let inputs: NodeInputs = serde_json::from_str(r#"{"text": "1boy, bad_hands, holding_phone"}"#).unwrap();
        let outputs = invoke(inputs);
        assert_eq!(
            outputs.processed_text,
            Prompt::Single("1girl, solo, holding_cellphone, masterpiece, best_quality".into())
        );
    }

    #[test]
    fn test_inputs_missing_rules_use_defaults() {
        let inputs: NodeInputs = serde_json::from_str(r#"{"text": ["worst_quality, a"]}"#).unwrap();
        assert_eq!(inputs.tags_to_remove, DEFAULT_REMOVE);

        let outputs = invoke(inputs);
        assert_eq!(
            outputs.processed_text,
            Prompt::Batch(vec!["a, masterpiece, best_quality".into()])
        );
    }

    #[test]
    fn test_inputs_explicit_empty_rules() {
        let inputs: NodeInputs = serde_json::from_str(
            r#"{"text": "a, a", "tags_to_remove": "", "tags_to_replace": "", "tags_to_append": ""}"#,
        )
        .unwrap();
        assert_eq!(invoke(inputs).processed_text, Prompt::Single("a".into()));
    }

    #[test]
    fn test_outputs_serialize_with_output_name() {
        let outputs = NodeOutputs {
            processed_text: Prompt::Batch(vec!["x".into()]),
        };
        assert_eq!(serde_json::to_string(&outputs).unwrap(), r#"{"processed_text":["x"]}"#);
    }
}
