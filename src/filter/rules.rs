//! Rule text compilation
//!
//! Turns the three free-form rule texts into a [`RuleSet`]:
//!
//! ```text
//! # Tags to replace (format: old > new)
//! holding_phone > holding_cellphone
//! 1boy > 1girl, solo
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Lines that don't
//! form a rule are skipped rather than reported.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Marks a rule line as a comment
pub const COMMENT_MARKER: char = '#';

/// Characters that end a rule line, including the Unicode line and
/// paragraph separators and the ASCII form/record separators
pub const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Separates the old tag from its replacement
pub const REPLACE_SEPARATOR: char = '>';

/// Compiled tag rules, rebuilt from raw text on every invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    /// Tags dropped from the output, kept in authored order
    pub remove: IndexSet<String>,
    /// old tag -> replacement text (may hold several comma-separated tags)
    pub replace: IndexMap<String, String>,
    /// Tags added to every output, in authored order
    pub append: Vec<String>,
}

impl RuleSet {
    /// Compile all three rule texts
    pub fn compile(remove_text: &str, replace_text: &str, append_text: &str) -> Self {
        let rules = Self {
            remove: parse_remove(remove_text),
            replace: parse_replace(replace_text),
            append: parse_append(append_text),
        };

        log::debug!(
            "Compiled rules: {} remove, {} replace, {} append",
            rules.remove.len(),
            rules.replace.len(),
            rules.append.len()
        );

        rules
    }

    /// True when no rule of any kind is present
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.replace.is_empty() && self.append.is_empty()
    }
}

/// Trimmed lines that carry a rule (not blank, not a comment)
fn rule_lines(text: &str) -> impl Iterator<Item = &str> {
    // `lines()` only knows '\n' and "\r\n"
    text.split(LINE_BREAKS)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
}

/// Parse the removal text into a set of tags
pub fn parse_remove(text: &str) -> IndexSet<String> {
    rule_lines(text).map(str::to_string).collect()
}

/// Parse the replacement text into an ordered old -> new mapping
///
/// A later line for the same old tag overwrites the earlier value.
pub fn parse_replace(text: &str) -> IndexMap<String, String> {
    let mut mapping = IndexMap::new();

    for line in rule_lines(text) {
        let Some((old, new)) = line.split_once(REPLACE_SEPARATOR) else {
            log::debug!("Skipping replace line without '{}': {}", REPLACE_SEPARATOR, line);
            continue;
        };

        let old = old.trim();
        if old.is_empty() {
            log::debug!("Skipping replace line with empty tag: {}", line);
            continue;
        }

        mapping.insert(old.to_string(), new.trim().to_string());
    }

    mapping
}

/// Parse the append text into a tag sequence, duplicates kept
pub fn parse_append(text: &str) -> Vec<String> {
    rule_lines(text).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remove_skips_comments_and_blanks() {
        let remove = parse_remove("# Tags to remove\n\nbad_hands\n   \n  worst_quality  \n");
        assert_eq!(remove.len(), 2);
        assert!(remove.contains("bad_hands"));
        assert!(remove.contains("worst_quality"));
    }

    #[test]
    fn test_parse_remove_indented_comment() {
        let remove = parse_remove("   # still a comment\nkeep");
        assert_eq!(remove, IndexSet::from(["keep".to_string()]));
    }

    #[test]
    fn test_parse_replace_basic() {
        let replace = parse_replace("holding_phone > holding_cellphone\n1boy > 1girl, solo");
        assert_eq!(replace.get("holding_phone").map(String::as_str), Some("holding_cellphone"));
        assert_eq!(replace.get("1boy").map(String::as_str), Some("1girl, solo"));
    }

    #[test]
    fn test_parse_replace_splits_on_first_separator() {
        let replace = parse_replace("a > b > c");
        assert_eq!(replace.get("a").map(String::as_str), Some("b > c"));
    }

    #[test]
    fn test_parse_replace_skips_malformed_lines() {
        let replace = parse_replace("no separator here\n > orphan\n# a > b\n\nx>y");
        assert_eq!(replace.len(), 1);
        assert_eq!(replace.get("x").map(String::as_str), Some("y"));
    }

    #[test]
    fn test_parse_replace_last_duplicate_wins() {
        let replace = parse_replace("a > first\nb > other\na > second");
        assert_eq!(replace.len(), 2);
        assert_eq!(replace.get("a").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_parse_replace_allows_empty_replacement() {
        let replace = parse_replace("drop_me >");
        assert_eq!(replace.get("drop_me").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_append_keeps_order_and_duplicates() {
        let append = parse_append("masterpiece\n# comment\nbest_quality\nmasterpiece");
        assert_eq!(append, vec!["masterpiece", "best_quality", "masterpiece"]);
    }

    #[test]
    fn test_crlf_and_lone_cr_line_endings() {
        assert_eq!(parse_append("a\r\nb\rc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unicode_and_control_line_breaks() {
        for sep in ['\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}'] {
            let text = format!("a{}b", sep);
            assert_eq!(parse_append(&text), vec!["a", "b"], "separator {:?}", sep);
        }

        let replace = parse_replace("x > y\u{2028}p > q");
        assert_eq!(replace.get("x").map(String::as_str), Some("y"));
        assert_eq!(replace.get("p").map(String::as_str), Some("q"));
    }

    #[test]
    fn test_remove_serializes_in_authored_order() {
        let rules = RuleSet::compile("f\nb\nd\na\ne\nc\nb", "", "");
        let json = serde_json::to_string(&rules.remove).unwrap();
        assert_eq!(json, r#"["f","b","d","a","e","c"]"#);

        for _ in 0..20 {
            let again = RuleSet::compile("f\nb\nd\na\ne\nc\nb", "", "");
            assert_eq!(serde_json::to_string(&again.remove).unwrap(), json);
        }
    }

    #[test]
    fn test_compile_comment_only_texts_is_empty() {
        let rules = RuleSet::compile("# nothing\n\n", "  \n# a > b", "#x\n");
        assert!(rules.is_empty());
    }

    #[test]
    fn test_remove_keeps_first_position_of_duplicates() {
        let rules = RuleSet::compile("zeta\nalpha\nzeta\nmid", "", "");
        let tags: Vec<&str> = rules.remove.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["zeta", "alpha", "mid"]);
    }
}
