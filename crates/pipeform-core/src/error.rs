//! Error types for pipeform-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
