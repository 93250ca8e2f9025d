//! Configuration processing errors.

use thiserror::Error;

use crate::interpolation::ContextTooComplexError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration tree: {0}")]
    Tree(#[from] pipeform_core::Error),

    #[error("configuration file is empty")]
    Empty,

    #[error("invalid spec header: {0}")]
    InvalidHeader(String),

    #[error(transparent)]
    ContextTooComplex(#[from] ContextTooComplexError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
