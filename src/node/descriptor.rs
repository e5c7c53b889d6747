//! Static node descriptor
//!
//! Describes the node to a host: identifier, display label, the inputs it
//! accepts and the outputs it returns.

use serde::Serialize;

/// Value type of a node socket or widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    String,
}

/// A declared node input
#[derive(Debug, Clone, Serialize)]
pub struct InputSpec {
    pub name: &'static str,
    pub r#type: ValueType,
    pub required: bool,

    /// Value must come from an upstream node, not a widget
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_input: bool,

    /// Accepts a list of values as well as a single value
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub accepts_list: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multiline: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl InputSpec {
    /// Required text input fed by another node
    const fn linked(name: &'static str) -> Self {
        Self {
            name,
            r#type: ValueType::String,
            required: true,
            force_input: true,
            accepts_list: true,
            multiline: false,
            default: None,
        }
    }

    /// Multi-line text widget with a default value
    const fn multiline(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            r#type: ValueType::String,
            required: true,
            force_input: false,
            accepts_list: false,
            multiline: true,
            default: Some(default),
        }
    }
}

/// A declared node output
#[derive(Debug, Clone, Serialize)]
pub struct OutputSpec {
    pub name: &'static str,
    pub r#type: ValueType,

    /// Output is a list whenever the linked input was a list
    pub mirrors_input_shape: bool,
}

/// Everything a host needs to list and wire up a node
#[derive(Debug, Clone, Serialize)]
pub struct NodeDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub function: &'static str,
    pub description: &'static str,
    pub inputs: &'static [InputSpec],
    pub outputs: &'static [OutputSpec],
}

impl NodeDescriptor {
    /// Look up an input by name
    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs.iter().find(|input| input.name == name)
    }

    /// Default value of a widget input, empty if it has none
    pub fn default_for(&self, name: &str) -> &'static str {
        self.input(name).and_then(|input| input.default).unwrap_or("")
    }
}

pub const DEFAULT_REMOVE: &str = "# Tags to remove (one per line)\nbad_hands\nworst_quality";

pub const DEFAULT_REPLACE: &str =
    "# Tags to replace (format: old > new)\nholding_phone > holding_cellphone\n1boy > 1girl, solo";

pub const DEFAULT_APPEND: &str = "# Tags to always append (one per line)\nmasterpiece\nbest_quality";

pub const INPUT_TEXT: &str = "text";
pub const INPUT_REMOVE: &str = "tags_to_remove";
pub const INPUT_REPLACE: &str = "tags_to_replace";
pub const INPUT_APPEND: &str = "tags_to_append";
pub const OUTPUT_TEXT: &str = "processed_text";

/// The prompt tag filter node
pub static TAG_FILTER: NodeDescriptor = NodeDescriptor {
    id: "PromptProcessorNode",
    display_name: "Prompt Tag Filter",
    category: "text/utils",
    function: "process",
    description: "Removes, replaces and appends comma-separated tags in a prompt or list of prompts",
    inputs: &[
        InputSpec::linked(INPUT_TEXT),
        InputSpec::multiline(INPUT_REMOVE, DEFAULT_REMOVE),
        InputSpec::multiline(INPUT_REPLACE, DEFAULT_REPLACE),
        InputSpec::multiline(INPUT_APPEND, DEFAULT_APPEND),
    ],
    outputs: &[OutputSpec {
        name: OUTPUT_TEXT,
        r#type: ValueType::String,
        mirrors_input_shape: true,
    }],
};
