//! Filter-then-validate pipeline over a flat field mapping
//!
//! A [`Validator`] holds the input data, ordered filter and rule lists per
//! field, and the errors of the last [`Validator::validate`] run. Filters
//! registered under the wildcard scope `"*"` run on every field before the
//! field's own filters. Rules are only evaluated for the fields they were
//! registered under.
//!
//! ```
//! use sieve_validation::Validator;
//! use serde_json::json;
//!
//! let data = json!({"name": "  bob  ", "email": "bob.example"});
//! let mut validator = Validator::new(data.as_object().unwrap().clone());
//!
//! validator
//!     .add_filter_descriptor(None, "trim").unwrap()
//!     .add_filter_descriptor(Some("name"), "upperCase").unwrap()
//!     .add_rule_descriptor(Some("email"), "email:required", None).unwrap();
//!
//! assert!(!validator.filter_and_validate(None));
//! assert_eq!(validator.get("name"), json!("BOB"));
//! assert_eq!(validator.errors()[0].error_code, "EMAIL_NOT_VALID_ERROR");
//! ```

use crate::traits::is_empty_value;
use crate::{
    FieldError, FieldErrors, Filter, FilterBuilder, Params, Registry, Result, Rule, RuleBuilder,
    RuleKind,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Scope key for filters applied to every field
pub const WILDCARD: &str = "*";

/// Flat field mapping, iterated in insertion order
pub type Data = Map<String, Value>;

/// Called with the validator after a successful run
pub type ValidCallback = Box<dyn FnMut(&Validator) + Send>;

/// Called with the collected errors after a failed run
pub type ErrorCallback = Box<dyn FnMut(&[FieldError]) + Send>;

/// Deferred source of a callback, resolved at most once
pub type CallbackProvider<C> = Box<dyn FnOnce() -> Option<C> + Send>;

pub struct Validator {
    data: Data,
    rules: IndexMap<String, Vec<Box<dyn Rule>>>,
    filters: IndexMap<String, Vec<Box<dyn Filter>>>,
    errors: Vec<FieldError>,
    rule_builder: RuleBuilder,
    filter_builder: FilterBuilder,
    on_valid: Option<ValidCallback>,
    on_error: Option<ErrorCallback>,
    valid_provider: Option<CallbackProvider<ValidCallback>>,
    error_provider: Option<CallbackProvider<ErrorCallback>>,
}

impl Validator {
    /// Create a validator using the shared built-in registry
    pub fn new(data: Data) -> Self {
        Self::with_registry(data, Registry::shared())
    }

    /// Create a validator resolving descriptors through `registry`
    pub fn with_registry(data: Data, registry: Arc<Registry>) -> Self {
        Self {
            data,
            rules: IndexMap::new(),
            filters: IndexMap::new(),
            errors: Vec::new(),
            rule_builder: RuleBuilder::new(Arc::clone(&registry)),
            filter_builder: FilterBuilder::new(registry),
            on_valid: None,
            on_error: None,
            valid_provider: None,
            error_provider: None,
        }
    }

    /// Attach deferred callback providers. Each is invoked at most once, at
    /// the start of the first [`validate`](Self::validate) that lacks the
    /// corresponding callback.
    pub fn with_providers(
        mut self,
        valid: Option<CallbackProvider<ValidCallback>>,
        error: Option<CallbackProvider<ErrorCallback>>,
    ) -> Self {
        self.valid_provider = valid;
        self.error_provider = error;
        self
    }

    /// Set the callback run after a successful validation
    pub fn on_valid<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&Validator) + Send + 'static,
    {
        self.on_valid = Some(Box::new(callback));
        self
    }

    /// Set the callback run after a failed validation
    pub fn on_error<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&[FieldError]) + Send + 'static,
    {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn rule_builder(&self) -> &RuleBuilder {
        &self.rule_builder
    }

    pub fn filter_builder(&self) -> &FilterBuilder {
        &self.filter_builder
    }

    /// Attach a rule to a field, or to the `"*"` pseudo-field when `field`
    /// is `None` or empty
    pub fn add_rule(&mut self, field: Option<&str>, rule: Box<dyn Rule>) -> &mut Self {
        self.rules.entry(scope(field)).or_default().push(rule);
        self
    }

    /// Build a rule from a descriptor and attach it
    pub fn add_rule_descriptor(
        &mut self,
        field: Option<&str>,
        descriptor: &str,
        error: Option<&str>,
    ) -> Result<&mut Self> {
        let rule = self.rule_builder.create_rule(descriptor, error)?;
        Ok(self.add_rule(field, rule))
    }

    /// Build and attach several rules to one field
    pub fn add_rules<I, S>(&mut self, field: Option<&str>, descriptors: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for rule in self.rule_builder.create_rules(descriptors)? {
            self.add_rule(field, rule);
        }
        Ok(self)
    }

    /// Attach a filter to a field, or to every field when `field` is `None`
    /// or empty
    pub fn add_filter(&mut self, field: Option<&str>, filter: Box<dyn Filter>) -> &mut Self {
        self.filters.entry(scope(field)).or_default().push(filter);
        self
    }

    /// Build a filter from a descriptor and attach it
    pub fn add_filter_descriptor(
        &mut self,
        field: Option<&str>,
        descriptor: &str,
    ) -> Result<&mut Self> {
        let filter = self.filter_builder.create_filter(descriptor)?;
        Ok(self.add_filter(field, filter))
    }

    /// Run the filter pass. `data`, when given, replaces the stored data first.
    ///
    /// Each field goes through the wildcard filters, then its own filters,
    /// every filter seeing the previous one's output.
    pub fn apply_filters(&mut self, data: Option<Data>) -> &mut Self {
        if let Some(data) = data {
            self.data = data;
        }

        let wildcard = self.filters.get(WILDCARD);
        for (field, value) in self.data.iter_mut() {
            let specific = match field.as_str() {
                WILDCARD => None,
                name => self.filters.get(name),
            };

            for filter in wildcard.into_iter().chain(specific).flatten() {
                let current = std::mem::take(value);
                *value = filter.process_filter(current);
            }
        }

        self
    }

    /// Run the validation pass and fire the matching callback.
    ///
    /// Every failing rule of every field is reported; nothing short-circuits.
    pub fn validate(&mut self, data: Option<Data>) -> bool {
        self.errors.clear();
        if let Some(data) = data {
            self.data = data;
        }

        self.resolve_callbacks();

        for (field, rules) in &self.rules {
            let value = field_value(&self.data, field);
            for rule in rules {
                if Self::validate_rule(&**rule, &value) {
                    continue;
                }

                debug!("Field '{}' failed rule {} with {}", field, rule.name(), rule.error());
                self.errors.push(
                    FieldError::new(field.as_str(), rule.error())
                        .with_params(rule.error_params().clone()),
                );
            }
        }

        if self.is_valid() {
            debug!("Validation passed for {} field(s)", self.rules.len());
            if let Some(mut callback) = self.on_valid.take() {
                callback(self);
                self.on_valid = Some(callback);
            }
            return true;
        }

        debug!("Validation failed with {} error(s)", self.errors.len());
        if let Some(mut callback) = self.on_error.take() {
            callback(&self.errors);
            self.on_error = Some(callback);
        }

        false
    }

    /// Filter, then validate the filtered data
    pub fn filter_and_validate(&mut self, data: Option<Data>) -> bool {
        self.apply_filters(data).validate(None)
    }

    /// Evaluate one rule against a value.
    ///
    /// Empty values pass optional rules without evaluating them.
    pub fn validate_rule(rule: &dyn Rule, value: &Value) -> bool {
        if is_empty_value(value) && !rule.is_required() {
            return true;
        }

        match rule.kind() {
            RuleKind::Format(format) => format.check(value),
            RuleKind::Predicate => rule.validate(value),
        }
    }

    /// Record an error
    pub fn add_error(&mut self, field: &str, error_code: &str, params: Params) {
        self.errors.push(FieldError::new(field, error_code).with_params(params));
    }

    /// Current value of a field: strings trimmed, `null` when absent
    pub fn get(&self, key: &str) -> Value {
        field_value(&self.data, key)
    }

    /// Current value of a field, or `default` when absent
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        if self.data.contains_key(key) {
            field_value(&self.data, key)
        } else {
            default
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn into_data(self) -> Data {
        self.data
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors of the last validation run, in field then rule order
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn errors_count(&self) -> usize {
        self.errors.len()
    }

    pub fn field_errors(&self) -> FieldErrors {
        FieldErrors::new(self.errors.clone())
    }

    /// Rules registered for a field
    pub fn rules(&self, field: &str) -> &[Box<dyn Rule>] {
        self.rules.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Filters applied to a field: wildcard filters, then the field's own
    pub fn filters(&self, field: &str) -> Vec<&dyn Filter> {
        let wildcard = self.filters.get(WILDCARD);
        let specific = match field {
            WILDCARD => None,
            name => self.filters.get(name),
        };

        wildcard
            .into_iter()
            .chain(specific)
            .flatten()
            .map(|filter| &**filter)
            .collect()
    }

    fn resolve_callbacks(&mut self) {
        if self.on_valid.is_none() {
            if let Some(provider) = self.valid_provider.take() {
                self.on_valid = provider();
            }
        }
        if self.on_error.is_none() {
            if let Some(provider) = self.error_provider.take() {
                self.on_error = provider();
            }
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("data", &self.data)
            .field("rules", &self.rules)
            .field("filters", &self.filters)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

fn scope(field: Option<&str>) -> String {
    match field {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => WILDCARD.to_string(),
    }
}

fn field_value(data: &Data, key: &str) -> Value {
    match data.get(key) {
        Some(Value::String(text)) => Value::String(text.trim().to_string()),
        Some(value) => value.clone(),
        None => Value::Null,
    }
}
