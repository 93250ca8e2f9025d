//! Interpolation orchestration: placeholder discovery, resolution, and
//! structural substitution.

use indexmap::IndexMap;
use pipeform_core::Value;

use super::block::Block;
use super::context::Context;
use super::walker::{Halt, Walker};

/// Maximum number of distinct placeholders in one configuration.
pub const MAX_BLOCKS: usize = 10_000;

const CONFIG_TOO_LARGE: &str = "config too large";
const TOO_MANY_BLOCKS: &str = "too many interpolation blocks";

/// One-shot interpolation of a configuration tree against a context.
///
/// Evaluation happens once, at construction, and the outcome is stored:
/// either the fully substituted tree or a non-empty error list, never both.
/// Accessors replay the stored outcome, so a template is immutable and
/// idempotent afterwards.
#[derive(Debug)]
pub struct Template {
    result: Option<Value>,
    errors: Vec<String>,
    blocks: usize,
}

impl Template {
    pub fn new(tree: Value, context: Context) -> Self {
        let mut evaluation = Evaluation {
            context: &context,
            blocks: IndexMap::new(),
            errors: Vec::new(),
        };
        let outcome = Walker::new().replace(&tree, &mut |text| evaluation.transform(text));
        let blocks = evaluation.blocks.len();

        match outcome {
            Err(Halt::TooLarge) => Self {
                result: None,
                errors: vec![CONFIG_TOO_LARGE.to_string()],
                blocks,
            },
            Err(Halt::Aborted) => Self {
                result: None,
                errors: vec![TOO_MANY_BLOCKS.to_string()],
                blocks,
            },
            Ok(_) if !evaluation.errors.is_empty() => Self {
                result: None,
                errors: evaluation.errors,
                blocks,
            },
            Ok(value) => Self {
                result: Some(value),
                errors: Vec::new(),
                blocks,
            },
        }
    }

    /// The substituted tree, present only when the run is valid.
    pub fn interpolated(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Consume the template, handing out the substituted tree.
    pub fn into_interpolated(self) -> Option<Value> {
        self.result
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Number of distinct placeholder texts discovered across the tree.
    /// Occurrences sharing identical raw text share one entry; each
    /// occurrence is still substituted at its own position.
    pub fn size(&self) -> usize {
        self.blocks
    }
}

struct Evaluation<'a> {
    context: &'a Context,
    // Registry of every distinct placeholder, keyed by raw text. A block is
    // resolved once; `None` records a failed resolution already reported.
    blocks: IndexMap<String, Option<Value>>,
    errors: Vec<String>,
}

impl Evaluation<'_> {
    fn transform(&mut self, text: &str) -> Result<Value, ()> {
        if !text.contains("$[[") {
            return Ok(Value::String(text.to_string()));
        }

        // A node that is exactly one placeholder takes the resolved value
        // itself, native type preserved.
        if let Some(block) = Block::whole(text) {
            return Ok(match self.resolve(&block)? {
                Some(value) => value,
                None => Value::String(text.to_string()),
            });
        }

        // Embedded placeholders splice their textual form between the
        // literal runs, left to right.
        let mut rebuilt = String::with_capacity(text.len());
        let mut cursor = 0;
        for (span, block) in Block::scan(text) {
            rebuilt.push_str(&text[cursor..span.start]);
            if let Some(value) = self.resolve(&block)? {
                rebuilt.push_str(&value.to_text());
            }
            cursor = span.end;
        }
        rebuilt.push_str(&text[cursor..]);
        Ok(Value::String(rebuilt))
    }

    // Resolve through the registry. `Err(())` aborts the walk (distinct
    // placeholder bound breached); `Ok(None)` marks an unresolved reference
    // whose error is already recorded.
    fn resolve(&mut self, block: &Block) -> Result<Option<Value>, ()> {
        if let Some(cached) = self.blocks.get(block.raw()) {
            return Ok(cached.clone());
        }
        if self.blocks.len() == MAX_BLOCKS {
            return Err(());
        }

        let resolved = block.resolve(self.context).cloned();
        if resolved.is_none() {
            self.errors
                .push(format!("unknown interpolation reference: `{}`", block.content()));
        }
        self.blocks.insert(block.raw().to_string(), resolved.clone());
        Ok(resolved)
    }
}
