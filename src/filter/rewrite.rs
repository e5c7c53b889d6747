//! Prompt rewriting
//!
//! Applies a [`RuleSet`] to comma-separated prompts.

use std::collections::HashSet;

use super::Prompt;
use super::rules::RuleSet;

/// Separator used when joining tags back into a prompt
pub const TAG_JOINER: &str = ", ";

/// Split a comma-separated string into trimmed, non-empty tags
pub fn split_tags(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|tag| !tag.is_empty())
}

/// Rewrite a single prompt string
///
/// Each tag is replaced first, the replacement is split again and every
/// resulting tag is checked against the removal set. Appended tags skip the
/// removal check. The result is deduplicated keeping first occurrences.
pub fn rewrite_prompt(prompt: &str, rules: &RuleSet) -> String {
    let mut tags: Vec<&str> = Vec::new();

    for tag in split_tags(prompt) {
        let replaced = rules.replace.get(tag).map(String::as_str).unwrap_or(tag);

        tags.extend(split_tags(replaced).filter(|sub| !rules.remove.contains(*sub)));
    }

    tags.extend(rules.append.iter().map(String::as_str));

    let mut seen = HashSet::with_capacity(tags.len());
    tags.retain(|tag| seen.insert(*tag));

    tags.join(TAG_JOINER)
}

/// Rewrite a prompt or batch of prompts, keeping the input shape
pub fn rewrite(prompt: Prompt, rules: &RuleSet) -> Prompt {
    let is_batch = prompt.is_batch();

    let processed: Vec<String> = prompt
        .into_vec()
        .iter()
        .map(|text| rewrite_prompt(text, rules))
        .collect();

    log::debug!("Rewrote {} prompt(s)", processed.len());

    Prompt::from_vec(processed, is_batch)
}
