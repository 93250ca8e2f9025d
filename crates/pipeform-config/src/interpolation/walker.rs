//! Bounded depth-first rebuilding of configuration trees.

use pipeform_core::{Mapping, Value};

/// Maximum number of nodes one walk may visit.
pub const MAX_NODES: usize = 500_000;

/// Why a walk stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The visited-node counter exceeded [`MAX_NODES`].
    TooLarge,
    /// The transform asked the walk to stop.
    Aborted,
}

/// Single-use, bounded depth-first tree walker.
///
/// Node accounting: every value node counts one (containers included) and
/// every mapping key counts one more. Traversal is depth-first, mapping
/// entries in order, key before value. The walk consumes the walker, so one
/// instance produces exactly one outcome.
#[derive(Debug, Default)]
pub struct Walker {
    visited: usize,
}

impl Walker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild `tree`, passing every string node — mapping keys and scalar
    /// string values — through `transform` and substituting the returned
    /// value at the same position. Transformed keys are cast back to text.
    ///
    /// The partially rebuilt tree is discarded whenever the walk halts.
    pub fn replace<F>(mut self, tree: &Value, transform: &mut F) -> Result<Value, Halt>
    where
        F: FnMut(&str) -> Result<Value, ()>,
    {
        self.replace_value(tree, transform)
    }

    fn replace_value<F>(&mut self, value: &Value, transform: &mut F) -> Result<Value, Halt>
    where
        F: FnMut(&str) -> Result<Value, ()>,
    {
        self.visit()?;
        match value {
            Value::String(text) => transform(text).map_err(|_| Halt::Aborted),
            Value::Sequence(seq) => {
                let mut rebuilt = Vec::with_capacity(seq.len());
                for item in seq {
                    rebuilt.push(self.replace_value(item, transform)?);
                }
                Ok(Value::Sequence(rebuilt))
            }
            Value::Mapping(map) => {
                let mut rebuilt = Mapping::with_capacity(map.len());
                for (key, val) in map {
                    self.visit()?;
                    let key = transform(key).map_err(|_| Halt::Aborted)?.to_text();
                    rebuilt.insert(key, self.replace_value(val, transform)?);
                }
                Ok(Value::Mapping(rebuilt))
            }
            scalar => Ok(scalar.clone()),
        }
    }

    fn visit(&mut self) -> Result<(), Halt> {
        self.visited += 1;
        if self.visited > MAX_NODES {
            Err(Halt::TooLarge)
        } else {
            Ok(())
        }
    }
}
