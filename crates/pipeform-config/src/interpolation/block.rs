//! Placeholder grammar: scanning and resolving `$[[ ... ]]` blocks.

use std::ops::Range;
use std::sync::LazyLock;

use pipeform_core::Value;
use regex::Regex;

use super::context::Context;

// Regex for matching $[[ ... ]] placeholders. The inner expression is
// non-greedy: it runs up to the first `]]` and may be empty.
static BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\[\[\s*(.*?)\s*\]\]").unwrap());

/// A single placeholder scanned out of a string: the full `$[[ ... ]]` text
/// and the trimmed inner expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    raw: String,
    content: String,
}

impl Block {
    /// Scan `text` for every non-overlapping placeholder, left to right,
    /// yielding each block together with its byte span in `text`.
    ///
    /// Scanning is pure: replaying on the same string yields the same
    /// sequence.
    pub fn scan(text: &str) -> impl Iterator<Item = (Range<usize>, Block)> + '_ {
        BLOCK_REGEX.captures_iter(text).map(|caps| {
            let raw = caps.get(0).map_or("", |m| m.as_str());
            let span = caps.get(0).map_or(0..0, |m| m.range());
            let content = caps.get(1).map_or("", |m| m.as_str());
            (
                span,
                Block {
                    raw: raw.to_string(),
                    content: content.to_string(),
                },
            )
        })
    }

    /// The single placeholder covering `text` exactly, ignoring surrounding
    /// whitespace. `None` when the text is not one whole placeholder.
    pub fn whole(text: &str) -> Option<Block> {
        let trimmed = text.trim();
        let (span, block) = Block::scan(trimmed).next()?;
        (span.start == 0 && span.end == trimmed.len()).then_some(block)
    }

    /// The full `$[[ ... ]]` text as it appeared in the source.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The trimmed inner expression.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Resolve the inner expression as a dotted attribute path against a
    /// context, preserving the native type of the resolved value.
    ///
    /// Returns `None` when any path segment is absent or an intermediate
    /// value is not a mapping; the caller decides how to report that.
    pub fn resolve<'a>(&self, context: &'a Context) -> Option<&'a Value> {
        context.fetch(self.content.split('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeform_core::Mapping;

    fn context(yaml: &str) -> Context {
        let value = Value::from_yaml(serde_yaml::from_str(yaml).unwrap()).unwrap();
        let Value::Mapping(map) = value else {
            panic!("expected mapping");
        };
        Context::new(map).unwrap()
    }

    fn scan_pairs(text: &str) -> Vec<(String, String)> {
        Block::scan(text)
            .map(|(_, b)| (b.raw().to_string(), b.content().to_string()))
            .collect()
    }

    #[test]
    fn test_scan_finds_occurrences_in_order() {
        let pairs = scan_pairs("a $[[ one ]] b $[[two]] c");
        assert_eq!(
            pairs,
            vec![
                ("$[[ one ]]".to_string(), "one".to_string()),
                ("$[[two]]".to_string(), "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_scan_is_replayable() {
        let text = "$[[ a.b ]] and $[[ c ]]";
        assert_eq!(scan_pairs(text), scan_pairs(text));
    }

    #[test]
    fn test_scan_empty_content() {
        let pairs = scan_pairs("$[[]] $[[  ]]");
        assert_eq!(pairs[0], ("$[[]]".to_string(), String::new()));
        assert_eq!(pairs[1], ("$[[  ]]".to_string(), String::new()));
    }

    #[test]
    fn test_scan_no_match() {
        assert!(scan_pairs("plain text ${not.this}").is_empty());
        assert!(scan_pairs("$[[ unterminated").is_empty());
    }

    #[test]
    fn test_whole_match() {
        let block = Block::whole("  $[[ inputs.data ]]  ").unwrap();
        assert_eq!(block.content(), "inputs.data");
        assert!(Block::whole("$[[ a ]] trailing").is_none());
        assert!(Block::whole("$[[ a ]]$[[ b ]]").is_none());
    }

    #[test]
    fn test_resolve_preserves_native_type() {
        let ctx = context("inputs:\n  flag: true\n  count: 3\n  name: web");
        let resolve = |path: &str| {
            Block {
                raw: format!("$[[ {path} ]]"),
                content: path.to_string(),
            }
            .resolve(&ctx)
            .cloned()
        };
        assert_eq!(resolve("inputs.flag"), Some(Value::Bool(true)));
        assert_eq!(resolve("inputs.count"), Some(Value::from(3)));
        assert_eq!(resolve("inputs.name"), Some(Value::from("web")));
    }

    #[test]
    fn test_resolve_missing_segment() {
        let ctx = context("inputs:\n  name: web");
        let block = Block::whole("$[[ inputs.missing ]]").unwrap();
        assert_eq!(block.resolve(&ctx), None);
        let block = Block::whole("$[[ nothing.name ]]").unwrap();
        assert_eq!(block.resolve(&ctx), None);
    }

    #[test]
    fn test_resolve_through_non_mapping() {
        // `inputs.name` is a string; descending further must fail softly.
        let ctx = context("inputs:\n  name: web");
        let block = Block::whole("$[[ inputs.name.deeper ]]").unwrap();
        assert_eq!(block.resolve(&ctx), None);
    }

    #[test]
    fn test_resolve_empty_content() {
        let ctx = Context::new(Mapping::new()).unwrap();
        let block = Block::whole("$[[]]").unwrap();
        assert_eq!(block.resolve(&ctx), None);
    }
}
