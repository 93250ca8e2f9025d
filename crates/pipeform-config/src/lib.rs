//! Configuration processing for pipeform.
//!
//! This crate handles:
//! - Placeholder interpolation over decoded configuration trees
//! - Input schema validation and merging
//! - Loading parameterized configuration files (spec header + body)

pub mod error;
pub mod inputs;
pub mod interpolation;
pub mod loader;

pub use error::{ConfigError, ConfigResult};
pub use inputs::Inputs;
pub use interpolation::{Context, ContextTooComplexError, Template};
pub use loader::{LoadOutcome, load};
