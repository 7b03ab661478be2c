use crate::{Params, Rule, RuleMeta};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Rule backed by a closure
///
/// ```
/// use sieve_validation::{CallbackRule, Rule};
/// use serde_json::json;
///
/// let even = CallbackRule::new("Even", "NOT_EVEN_ERROR", |value| {
///     value.as_i64().is_some_and(|n| n % 2 == 0)
/// });
/// assert!(even.validate(&json!(4)));
/// assert!(!even.validate(&json!(3)));
/// ```
#[derive(Clone)]
pub struct CallbackRule {
    name: String,
    meta: RuleMeta,
    predicate: Predicate,
}

impl CallbackRule {
    pub fn new<F>(name: impl Into<String>, error: &str, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::with_params(name, error, Params::new(), predicate)
    }

    pub fn with_params<F>(
        name: impl Into<String>,
        error: &str,
        params: Params,
        predicate: F,
    ) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            meta: RuleMeta::new(params, error),
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate even when the value is empty
    pub fn required(mut self) -> Self {
        self.meta.required = true;
        self
    }
}

impl fmt::Debug for CallbackRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRule")
            .field("name", &self.name)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

impl Rule for CallbackRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RuleMeta {
        &mut self.meta
    }

    fn validate(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}
