// Rule and filter contracts

use crate::Format;
use crate::params::{Params, REQUIRED_PARAM};
use serde_json::Value;
use std::fmt;

/// How the validator evaluates a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// A built-in format check run by the validator
    Format(Format),
    /// The rule's own [`Rule::validate`]
    Predicate,
}

/// State shared by every rule: parameters, error code and the required flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    pub params: Params,
    pub error: String,
    pub error_params: Params,
    pub required: bool,
}

impl RuleMeta {
    /// Build the metadata from construction parameters.
    ///
    /// `required` is read from the `required` parameter; the error
    /// parameters are the remaining parameters.
    pub fn new(params: Params, default_error: &str) -> Self {
        Self {
            required: params.get_bool(REQUIRED_PARAM),
            error_params: params.without(REQUIRED_PARAM),
            error: default_error.to_string(),
            params,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// An acceptance rule for a field value
pub trait Rule: Send + Sync + fmt::Debug {
    /// Registry class name of the rule
    fn name(&self) -> &str;

    fn meta(&self) -> &RuleMeta;

    fn meta_mut(&mut self) -> &mut RuleMeta;

    /// Evaluation strategy. Defaults to [`RuleKind::Predicate`].
    fn kind(&self) -> RuleKind {
        RuleKind::Predicate
    }

    /// Check a value. Never called with an empty value unless the rule is
    /// required.
    fn validate(&self, value: &Value) -> bool;

    fn params(&self) -> &Params {
        &self.meta().params
    }

    fn error(&self) -> &str {
        &self.meta().error
    }

    fn error_params(&self) -> &Params {
        &self.meta().error_params
    }

    fn is_required(&self) -> bool {
        self.meta().required
    }

    /// Override the error code. Empty codes are ignored.
    fn set_error(&mut self, code: &str) {
        if !code.is_empty() {
            self.meta_mut().error = code.to_string();
        }
    }
}

/// A sanitizing transformation applied to field values before validation
pub trait Filter: Send + Sync + fmt::Debug {
    /// Registry class name of the filter
    fn name(&self) -> &str;

    fn params(&self) -> &Params;

    /// Transform a value
    fn filter_value(&self, value: Value) -> Value;

    /// Entry point used by the validator
    fn process_filter(&self, value: Value) -> Value {
        tracing::trace!("Applying filter {}", self.name());
        self.filter_value(value)
    }
}

/// Emptiness as used by the optional-rule short circuit: null, `""`, `"0"`,
/// `[]`, `{}`, `false` and numeric zero
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => text.is_empty() || text == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
