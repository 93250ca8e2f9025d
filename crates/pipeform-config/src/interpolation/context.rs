//! Variable namespaces placeholders resolve against.

use pipeform_core::{Mapping, Value};
use thiserror::Error;

/// Maximum structural nesting depth of a context mapping.
///
/// Resolution only has to walk "namespace → flat map" shapes; a shallow
/// bound keeps dotted-path lookup simple and cheap.
pub const MAX_CONTEXT_DEPTH: usize = 3;

/// The context handed to interpolation was nested deeper than resolution
/// supports. This signals a bug in the caller assembling the context, not a
/// problem in user-authored configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("interpolation context is too complex: depth {depth} exceeds {max}")]
pub struct ContextTooComplexError {
    pub depth: usize,
    pub max: usize,
}

/// An immutable mapping of namespace → key/value map (e.g. `inputs`, `env`).
#[derive(Debug, Clone)]
pub struct Context {
    data: Mapping,
}

impl Context {
    /// Wrap a namespace mapping, failing fast when it is nested deeper than
    /// [`MAX_CONTEXT_DEPTH`]. The guard runs before any interpolation work
    /// begins.
    pub fn new(data: Mapping) -> Result<Self, ContextTooComplexError> {
        let depth = mapping_depth(&data);
        if depth > MAX_CONTEXT_DEPTH {
            return Err(ContextTooComplexError {
                depth,
                max: MAX_CONTEXT_DEPTH,
            });
        }
        Ok(Self { data })
    }

    /// Maximum nesting depth of the wrapped mapping. A flat
    /// namespace → value map has depth 2: one level for the namespace key,
    /// one for its value map.
    pub fn depth(&self) -> usize {
        mapping_depth(&self.data)
    }

    /// Walk a dotted path one segment at a time.
    ///
    /// Returns `None` when a segment is absent or an intermediate value is
    /// not itself a mapping.
    pub fn fetch<'a, I>(&self, segments: I) -> Option<&Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut segments = segments.into_iter();
        let mut current = self.data.get(segments.next()?)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }
}

// Only mappings contribute nesting; scalar and sequence values are leaves.
fn mapping_depth(map: &Mapping) -> usize {
    map.values()
        .map(|value| match value {
            Value::Mapping(inner) => 1 + mapping_depth(inner),
            _ => 1,
        })
        .max()
        .unwrap_or(0)
}
