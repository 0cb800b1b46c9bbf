//! Declarative input validation.
//!
//! Each endpoint declares its parameters as a static slice of
//! [`InputParameter`]s. [`Validator::validate`] walks that schema against the
//! inbound request, resolving aliases, and returns either a typed
//! [`ValidatedInput`] or every violation it found.

use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use crate::envelope::AdapterRequest;
use crate::errors::{AdapterError, Result, Violation, ViolationKind};
use crate::overrides::SymbolOverrides;

/// Request key carrying per-request symbol overrides.
pub const OVERRIDES_PARAM: &str = "overrides";

/// Expected JSON type of an input parameter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl ParamKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// One entry in an endpoint's input schema.
#[derive(Clone, Copy, Debug)]
pub struct InputParameter {
    /// Canonical name, used for lookups after validation.
    pub name: &'static str,
    /// Alternative request keys, tried in order after `name`.
    pub aliases: &'static [&'static str],
    pub required: bool,
    pub kind: ParamKind,
    pub description: &'static str,
}

impl InputParameter {
    /// Find the first supplied, non-null value under the name or an alias.
    fn find<'a>(&self, request: &'a AdapterRequest) -> Option<&'a Value> {
        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .filter_map(|key| request.data.get(*key))
            .find(|value| !value.is_null())
    }
}

/// Validated parameters keyed by canonical name.
#[derive(Clone, Debug)]
pub struct ValidatedInput {
    job_run_id: String,
    values: HashMap<&'static str, Value>,
    overrides: SymbolOverrides,
}

impl ValidatedInput {
    pub fn job_run_id(&self) -> &str {
        &self.job_run_id
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// String value of a parameter, if supplied.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// String value of a parameter the schema marks as required.
    pub fn required_str(&self, name: &str) -> Result<&str> {
        self.str(name)
            .ok_or_else(|| AdapterError::Validation(vec![Violation::missing(name)]))
    }

    /// Replace `symbol` with its override in the `adapter` namespace, if one exists.
    pub fn override_symbol(&self, adapter: &str, symbol: &str) -> String {
        self.overrides.resolve(adapter, symbol).to_string()
    }
}

/// Validates requests against a static schema.
pub struct Validator<'a> {
    schema: &'a [InputParameter],
    overrides: &'a SymbolOverrides,
}

impl<'a> Validator<'a> {
    pub fn new(schema: &'a [InputParameter], overrides: &'a SymbolOverrides) -> Self {
        Self { schema, overrides }
    }

    pub fn validate(&self, request: &AdapterRequest) -> Result<ValidatedInput> {
        let mut violations = Vec::new();
        let mut values = HashMap::new();

        for param in self.schema {
            match param.find(request) {
                None => {
                    if param.required {
                        debug!("Missing {}: {}", param.name, param.description);
                        violations.push(Violation::missing(param.name));
                    }
                }
                Some(value) if !param.kind.matches(value) => {
                    debug!(
                        "Expected {} for {}: {}",
                        param.kind.name(),
                        param.name,
                        param.description
                    );
                    violations.push(Violation::wrong_type(param.name, param.kind.name()));
                }
                Some(Value::String(s)) if param.required && s.trim().is_empty() => {
                    violations.push(Violation::missing(param.name));
                }
                Some(value) => {
                    values.insert(param.name, value.clone());
                }
            }
        }

        let overrides = match request.data.get(OVERRIDES_PARAM) {
            None | Some(Value::Null) => self.overrides.clone(),
            Some(value) => match SymbolOverrides::parse(value) {
                Some(request_overrides) => self.overrides.merged_with(&request_overrides),
                None => {
                    violations.push(Violation {
                        parameter: OVERRIDES_PARAM.to_string(),
                        kind: ViolationKind::InvalidOverrides,
                    });
                    SymbolOverrides::new()
                }
            },
        };

        if !violations.is_empty() {
            debug!("Rejected request: {} violation(s)", violations.len());
            return Err(AdapterError::Validation(violations));
        }

        Ok(ValidatedInput {
            job_run_id: request.job_run_id(),
            values,
            overrides,
        })
    }
}
