//! CLI command implementations.

pub mod lint;
pub mod render;

pub use lint::lint;
pub use render::render;

use anyhow::{Context as _, Result, bail};
use clap::ValueEnum;
use tracing::debug;

use pipeform_config::inputs::Args;
use pipeform_config::loader::{self, LoadOutcome};
use pipeform_core::{Mapping, Value};

/// Output format for rendered configurations.
#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
}

/// List the inputs declared by a configuration file's spec header.
pub fn inputs(path: &str) -> Result<()> {
    let source = read_source(path)?;
    let specs = loader::spec_header(&source)
        .with_context(|| format!("Failed to read spec header: {}", path))?;

    if specs.is_empty() {
        println!("No inputs declared");
        return Ok(());
    }

    for (name, spec) in &specs {
        match spec {
            Value::Null => println!("{name} (required)"),
            Value::Mapping(map) => match map.get("default") {
                Some(default) => println!("{name} (default: {})", default.to_text()),
                None => println!("{name} (required)"),
            },
            _ => println!("{name} (invalid specification)"),
        }
    }
    Ok(())
}

pub(crate) fn read_source(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path))
}

/// Read and load a configuration file with the given NAME=VALUE input and
/// environment pairs.
pub(crate) fn load_file(path: &str, inputs: &[String], env: &[String]) -> Result<LoadOutcome> {
    let source = read_source(path)?;
    let args: Args = parse_pairs(inputs)?;
    let env: Mapping = parse_pairs(env)?;

    debug!("loading configuration from {path}");
    loader::load(&source, args, env)
        .with_context(|| format!("Failed to load configuration: {}", path))
}

fn parse_pairs(pairs: &[String]) -> Result<Mapping> {
    let mut parsed = Mapping::with_capacity(pairs.len());
    for pair in pairs {
        let (name, value) = parse_pair(pair)?;
        parsed.insert(name, value);
    }
    Ok(parsed)
}

fn parse_pair(raw: &str) -> Result<(String, Value)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), Value::from(value))),
        _ => bail!("expected NAME=VALUE, got '{raw}'"),
    }
}
