//! Prompt tag filtering
//!
//! This module handles:
//! - Compiling remove/replace/append rule texts into a [`RuleSet`]
//! - Rewriting one prompt or a batch of prompts with those rules
//!
//! Nothing here keeps state between calls.

use serde::{Deserialize, Serialize};

pub mod rewrite;
pub mod rules;

pub use rewrite::rewrite;
pub use rules::RuleSet;

/// A prompt string, or a batch of them
///
/// Serialized untagged so a JSON string maps to `Single` and an array of
/// strings maps to `Batch`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Prompt {
    Single(String),
    Batch(Vec<String>),
}

impl Prompt {
    pub fn is_batch(&self) -> bool {
        matches!(self, Prompt::Batch(_))
    }

    /// Number of prompt strings held
    pub fn len(&self) -> usize {
        match self {
            Prompt::Single(_) => 1,
            Prompt::Batch(items) => items.len(),
        }
    }

    /// Flatten into a list of prompt strings
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Prompt::Single(text) => vec![text],
            Prompt::Batch(items) => items,
        }
    }

    /// Borrow the prompt strings
    pub fn as_slice(&self) -> &[String] {
        match self {
            Prompt::Single(text) => std::slice::from_ref(text),
            Prompt::Batch(items) => items,
        }
    }

    /// Rebuild a prompt of the given shape from processed strings
    pub fn from_vec(mut items: Vec<String>, batch: bool) -> Self {
        if batch {
            Prompt::Batch(items)
        } else {
            Prompt::Single(items.pop().unwrap_or_default())
        }
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Prompt::Single(text)
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Prompt::Single(text.to_string())
    }
}

impl From<Vec<String>> for Prompt {
    fn from(items: Vec<String>) -> Self {
        Prompt::Batch(items)
    }
}

/// Compile the three rule texts and apply them to `text`
pub fn process(text: Prompt, remove_text: &str, replace_text: &str, append_text: &str) -> Prompt {
    let rules = RuleSet::compile(remove_text, replace_text, append_text);
    rewrite(text, &rules)
}
