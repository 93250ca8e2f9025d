//! Input schema validation and argument merging.
//!
//! A configuration declares its inputs as `name → spec`, where a spec is
//! either null (required, implicitly a string) or a mapping such as
//! `{default: "main", type: "string"}`. Callers supply arguments as
//! `name → value`. Validation checks every rule and accumulates every
//! violation, so a rejected run reports all of its problems at once.

use indexmap::IndexMap;
use pipeform_core::Value;

/// Declared input specs, in declaration order.
pub type Specs = IndexMap<String, Value>;

/// Caller-supplied arguments, in supplied order.
pub type Args = IndexMap<String, Value>;

type TypeValidator = fn(&Value) -> bool;

// Registered input types. Adding a type means adding a row here; rule
// evaluation below is driven entirely by this table.
static INPUT_TYPES: &[(&str, TypeValidator)] = &[("string", Value::is_string)];

fn validator_for(type_name: &str) -> Option<TypeValidator> {
    INPUT_TYPES
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, validator)| *validator)
}

fn supported_types() -> String {
    INPUT_TYPES
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates caller arguments against declared input specs and merges the
/// two into the `inputs` namespace.
///
/// Validation runs once, at construction; `to_map` is meant to be read only
/// after confirming `is_valid`.
#[derive(Debug)]
pub struct Inputs {
    specs: Specs,
    args: Args,
    errors: Vec<String>,
}

impl Inputs {
    pub fn new(specs: Specs, args: Args) -> Self {
        let errors = validate(&specs, &args);
        Self {
            specs,
            args,
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The merged `name → value` map: the supplied argument when present,
    /// else the declared default. Declared names with neither are omitted.
    pub fn to_map(&self) -> IndexMap<String, Value> {
        let mut merged = IndexMap::with_capacity(self.specs.len());
        for (name, spec) in &self.specs {
            if let Some(value) = self.args.get(name) {
                merged.insert(name.clone(), value.clone());
            } else if let Some(default) = declared_default(spec) {
                merged.insert(name.clone(), default.clone());
            }
        }
        merged
    }
}

// The `default` entry of a spec mapping; `Some(Null)` when declared as null.
fn declared_default(spec: &Value) -> Option<&Value> {
    spec.as_mapping()?.get("default")
}

fn validate(specs: &Specs, args: &Args) -> Vec<String> {
    let mut errors = Vec::new();

    let unknown: Vec<&str> = args
        .keys()
        .filter(|name| !specs.contains_key(*name))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        errors.push(format!("unknown input arguments: {}", unknown.join(", ")));
    }

    for (name, spec) in specs {
        validate_input(name, spec, args, &mut errors);
    }

    errors
}

fn validate_input(name: &str, spec: &Value, args: &Args, errors: &mut Vec<String>) {
    let unknown_spec = || {
        format!(
            "unknown input specification for `{name}` (valid types: {})",
            supported_types()
        )
    };

    // A spec is null (required string input) or a mapping; anything else —
    // including a mapping declaring an unregistered type — is malformed and
    // short-circuits the remaining rules for this name only.
    let spec_map = match spec {
        Value::Null => None,
        Value::Mapping(map) => Some(map),
        _ => {
            errors.push(unknown_spec());
            return;
        }
    };

    let (type_name, check) = match spec_map.and_then(|map| map.get("type")) {
        None => ("string", Value::is_string as TypeValidator),
        Some(Value::String(declared)) => match validator_for(declared) {
            Some(check) => (declared.as_str(), check),
            None => {
                errors.push(unknown_spec());
                return;
            }
        },
        Some(_) => {
            errors.push(unknown_spec());
            return;
        }
    };

    let default = spec_map.and_then(|map| map.get("default"));
    let provided = args.get(name);

    if default.is_none() && provided.is_none() {
        errors.push(format!(
            "`{name}` input: required value has not been provided"
        ));
    }
    if let Some(default) = default {
        if !check(default) {
            errors.push(format!("`{name}` input: default value is not a {type_name}"));
        }
    }
    if let Some(value) = provided {
        if !check(value) {
            errors.push(format!("`{name}` input: provided value is not a {type_name}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_map(yaml: &str) -> IndexMap<String, Value> {
        let Value::Mapping(map) = Value::from_yaml(serde_yaml::from_str(yaml).unwrap()).unwrap()
        else {
            panic!("expected mapping");
        };
        map
    }

    #[test]
    fn test_default_fills_missing_argument() {
        let inputs = Inputs::new(decode_map("foo:\n  default: bar"), Args::new());
        assert!(inputs.is_valid());
        assert_eq!(inputs.to_map(), decode_map("foo: bar"));
    }

    #[test]
    fn test_supplied_argument_wins_over_default() {
        let inputs = Inputs::new(
            decode_map("foo:\n  default: bar"),
            decode_map("foo: custom"),
        );
        assert!(inputs.is_valid());
        assert_eq!(inputs.to_map(), decode_map("foo: custom"));
    }

    #[test]
    fn test_unknown_arguments_collected_in_one_message() {
        let inputs = Inputs::new(decode_map("foo: ~"), decode_map("foo: bar\ntest: bar"));
        assert_eq!(inputs.errors(), ["unknown input arguments: test"]);
    }

    #[test]
    fn test_unknown_arguments_preserve_supplied_order() {
        let inputs = Inputs::new(Specs::new(), decode_map("zeta: 1\nalpha: 2"));
        assert_eq!(inputs.errors(), ["unknown input arguments: zeta, alpha"]);
    }

    #[test]
    fn test_malformed_spec() {
        let inputs = Inputs::new(decode_map("foo: 123"), Args::new());
        assert_eq!(
            inputs.errors(),
            ["unknown input specification for `foo` (valid types: string)"]
        );
    }

    #[test]
    fn test_unregistered_type_is_malformed_spec() {
        let inputs = Inputs::new(decode_map("foo:\n  type: number"), decode_map("foo: '1'"));
        assert_eq!(
            inputs.errors(),
            ["unknown input specification for `foo` (valid types: string)"]
        );
    }

    #[test]
    fn test_required_value_missing() {
        let inputs = Inputs::new(decode_map("foo: ~"), Args::new());
        assert_eq!(
            inputs.errors(),
            ["`foo` input: required value has not been provided"]
        );
    }

    #[test]
    fn test_explicit_type_string_accepted() {
        let inputs = Inputs::new(
            decode_map("foo:\n  type: string"),
            decode_map("foo: value"),
        );
        assert!(inputs.is_valid());
    }

    #[test]
    fn test_non_string_default_rejected() {
        let inputs = Inputs::new(decode_map("foo:\n  default: 3"), Args::new());
        assert_eq!(inputs.errors(), ["`foo` input: default value is not a string"]);
    }

    #[test]
    fn test_null_default_counts_as_declared_but_fails_type_check() {
        let inputs = Inputs::new(decode_map("foo:\n  default: ~"), Args::new());
        assert_eq!(inputs.errors(), ["`foo` input: default value is not a string"]);
    }

    #[test]
    fn test_non_string_argument_rejected() {
        let inputs = Inputs::new(decode_map("foo: ~"), decode_map("foo: [1, 2]"));
        assert_eq!(inputs.errors(), ["`foo` input: provided value is not a string"]);
    }

    #[test]
    fn test_violations_accumulate_in_order() {
        let specs = decode_map("first: ~\nsecond:\n  default: 7");
        let args = decode_map("stray: x\nfirst: 99");
        let inputs = Inputs::new(specs, args);
        assert_eq!(
            inputs.errors(),
            [
                "unknown input arguments: stray",
                "`first` input: provided value is not a string",
                "`second` input: default value is not a string",
            ]
        );
    }

    #[test]
    fn test_unknown_argument_errors_are_monotonic() {
        let specs = decode_map("foo: ~");
        let base = Inputs::new(specs.clone(), decode_map("foo: bar\nextra: 1"));
        let more = Inputs::new(specs, decode_map("foo: bar\nextra: 1\nanother: 2"));
        assert_eq!(base.errors(), ["unknown input arguments: extra"]);
        assert_eq!(more.errors(), ["unknown input arguments: extra, another"]);
    }

    #[test]
    fn test_spec_annotations_ignored() {
        let inputs = Inputs::new(
            decode_map("foo:\n  default: bar\n  description: docs only"),
            Args::new(),
        );
        assert!(inputs.is_valid());
    }

    #[test]
    fn test_to_map_omits_unfilled_required_inputs() {
        let inputs = Inputs::new(decode_map("foo: ~\nbar:\n  default: x"), Args::new());
        assert!(!inputs.is_valid());
        assert_eq!(inputs.to_map(), decode_map("bar: x"));
    }
}
