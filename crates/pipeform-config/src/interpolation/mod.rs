//! Bounded placeholder interpolation over decoded configuration trees.
//!
//! A configuration may reference named inputs and other variable namespaces
//! through `$[[ expression ]]` placeholders, where the expression is a dotted
//! attribute path (`inputs.version`, `env.CI_COMMIT_SHA`). Interpolation
//! substitutes every placeholder anywhere in the tree, treating the tree as
//! untrusted input: the context depth, the visited-node count, and the
//! distinct-placeholder count are all hard-bounded.

pub mod block;
pub mod context;
pub mod template;
pub mod walker;

pub use block::Block;
pub use context::{Context, ContextTooComplexError, MAX_CONTEXT_DEPTH};
pub use template::{MAX_BLOCKS, Template};
pub use walker::{MAX_NODES, Walker};
