//! Loading parameterized configuration files.
//!
//! A configuration file may lead with a spec header — its own YAML document
//! declaring the file's inputs — separated from the body by `---`:
//!
//! ```yaml
//! spec:
//!   inputs:
//!     environment:
//!       default: staging
//! ---
//! deploy:
//!   script: "deploy --env $[[ inputs.environment ]]"
//! ```
//!
//! Loading splits the documents, validates the caller's arguments against
//! the declared inputs, assembles the `{inputs, env}` context, and
//! interpolates the body. Parse failures are fatal; validation and
//! interpolation problems are collected and reported together.

use serde::Deserialize;

use pipeform_core::{Mapping, Value};

use crate::error::{ConfigError, ConfigResult};
use crate::inputs::{Args, Inputs, Specs};
use crate::interpolation::{Context, Template};

/// Outcome of a load: the substituted configuration tree, or every problem
/// found on the way to one.
#[derive(Debug)]
pub struct LoadOutcome {
    content: Option<Value>,
    errors: Vec<String>,
}

impl LoadOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn content(&self) -> Option<&Value> {
        self.content.as_ref()
    }

    pub fn into_content(self) -> Option<Value> {
        self.content
    }

    fn invalid(errors: Vec<String>) -> Self {
        Self {
            content: None,
            errors,
        }
    }
}

/// Load a configuration source end to end: split off the spec header,
/// validate `args` against the declared inputs, and interpolate the body
/// against the `{inputs, env}` context.
pub fn load(source: &str, args: Args, env: Mapping) -> ConfigResult<LoadOutcome> {
    let (specs, body) = split_documents(source)?;

    let inputs = Inputs::new(specs, args);
    if !inputs.is_valid() {
        return Ok(LoadOutcome::invalid(inputs.errors().to_vec()));
    }

    let mut namespaces = Mapping::new();
    namespaces.insert("inputs".to_string(), Value::Mapping(inputs.to_map()));
    namespaces.insert("env".to_string(), Value::Mapping(env));
    let context = Context::new(namespaces)?;

    let template = Template::new(body, context);
    let errors = template.errors().to_vec();
    Ok(LoadOutcome {
        content: template.into_interpolated(),
        errors,
    })
}

/// The inputs declared by a source's spec header; empty when the file has
/// no header.
pub fn spec_header(source: &str) -> ConfigResult<Specs> {
    Ok(split_documents(source)?.0)
}

// Split a source into (declared specs, body). A header is only recognized
// when the file holds two documents and the first one carries a top-level
// `spec` key.
fn split_documents(source: &str) -> ConfigResult<(Specs, Value)> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(source) {
        let value = serde_yaml::Value::deserialize(document)?;
        documents.push(Value::from_yaml(value)?);
    }

    match documents.len() {
        0 => Err(ConfigError::Empty),
        1 if documents[0] == Value::Null => Err(ConfigError::Empty),
        1 => Ok((Specs::new(), documents.remove(0))),
        2 => {
            let body = documents.remove(1);
            let header = documents.remove(0);
            Ok((header_specs(header)?, body))
        }
        n => Err(ConfigError::InvalidHeader(format!(
            "expected at most two YAML documents, found {n}"
        ))),
    }
}

fn header_specs(header: Value) -> ConfigResult<Specs> {
    let Value::Mapping(mut header) = header else {
        return Err(ConfigError::InvalidHeader(
            "leading document is not a mapping".to_string(),
        ));
    };
    let Some(spec) = header.shift_remove("spec") else {
        return Err(ConfigError::InvalidHeader(
            "leading document does not declare `spec`".to_string(),
        ));
    };
    let Value::Mapping(mut spec) = spec else {
        return Err(ConfigError::InvalidHeader(
            "`spec` must be a mapping".to_string(),
        ));
    };
    match spec.shift_remove("inputs") {
        None | Some(Value::Null) => Ok(Specs::new()),
        Some(Value::Mapping(inputs)) => Ok(inputs),
        Some(_) => Err(ConfigError::InvalidHeader(
            "`spec:inputs` must be a mapping".to_string(),
        )),
    }
}
